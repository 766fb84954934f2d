//! sncicd-batch-install - Entry Point
//!
//! Installs a batch of applications and plugins on a ServiceNow instance and
//! waits for the result. Inputs come from `--key=value` arguments or the
//! environment variables a GitHub Actions runner provides.

use colored::Colorize;
use tracing::error;

use sncicd_batch_install::app::inputs::Inputs;
use sncicd_batch_install::app::options::{log_options, InstallOptions};
use sncicd_batch_install::app::run::run;
use sncicd_batch_install::filesys::file::File;
use sncicd_batch_install::logs::init_logging;
use sncicd_batch_install::report::ActionsReporter;
use sncicd_batch_install::utils::version_info;

#[tokio::main]
async fn main() {
    let inputs = Inputs::from_env();

    if inputs.is_set("version") {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{}", e),
        }
        return;
    }

    if let Err(e) = init_logging(log_options(&inputs)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let options = match InstallOptions::from_inputs(&inputs) {
        Ok(options) => options,
        Err(e) => fail(&e.to_string()),
    };

    let reporter = ActionsReporter::new(options.output_file.clone().map(File::new));

    if let Err(e) = run(&options, &inputs, &reporter).await {
        fail(&e.to_string());
    }
}

fn fail(message: &str) -> ! {
    error!("Batch install failed: {}", message);
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
    std::process::exit(1);
}
