//! Progress reporting and named outputs

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::InstallError;
use crate::filesys::file::File;

/// Output name under which the rollback link is published
pub const ROLLBACK_OUTPUT: &str = "rollbackURL";

/// Sink for informational lines and named step outputs
#[async_trait]
pub trait Reporter: Send + Sync {
    /// Emit an informational line
    fn info(&self, message: &str);

    /// Publish a named output value
    async fn set_output(&self, name: &str, value: &str) -> Result<(), InstallError>;
}

/// Reporter for GitHub Actions style runners.
///
/// Progress lines go to the console writer regardless of the log level.
pub struct ActionsReporter {
    output_file: Option<File>,
    console: Mutex<Box<dyn Write + Send>>,
}

impl ActionsReporter {
    /// Outputs go to `output_file` when given, else to stdout as workflow commands
    pub fn new(output_file: Option<File>) -> Self {
        Self::with_console(output_file, Box::new(std::io::stdout()))
    }

    /// Same as `new`, writing console lines to `console`
    pub fn with_console(output_file: Option<File>, console: Box<dyn Write + Send>) -> Self {
        Self {
            output_file,
            console: Mutex::new(console),
        }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut console = self
            .console
            .lock()
            .map_err(|_| std::io::Error::other("console writer poisoned"))?;
        writeln!(console, "{}", line)?;
        console.flush()
    }
}

#[async_trait]
impl Reporter for ActionsReporter {
    fn info(&self, message: &str) {
        debug!("{}", message);
        if let Err(e) = self.write_line(message) {
            warn!("Unable to write progress line: {}", e);
        }
    }

    async fn set_output(&self, name: &str, value: &str) -> Result<(), InstallError> {
        match &self.output_file {
            Some(file) => file
                .append_line(&format!("{}={}", name, value))
                .await
                .map_err(|e| InstallError::Output(format!("{}: {}", file.path().display(), e))),
            None => self
                .write_line(&format!("::set-output name={}::{}", name, value))
                .map_err(|e| InstallError::Output(e.to_string())),
        }
    }
}
