//! Application configuration options

use std::path::PathBuf;

use crate::app::inputs::Inputs;
use crate::authn::credentials::Credentials;
use crate::errors::InstallError;
use crate::logs::{LogLevel, LogOptions};
use crate::workers::poller;

/// Everything one install run needs, resolved from the inputs
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Basic-auth credentials
    pub credentials: Credentials,

    /// Install instance name; checked when the URL is derived
    pub instance: Option<String>,

    /// Workspace root for the `file` manifest source
    pub workspace: Option<PathBuf>,

    /// Manifest source selector
    pub source: String,

    /// File named outputs are appended to
    pub output_file: Option<PathBuf>,

    /// Poller worker options
    pub poller: poller::Options,
}

impl InstallOptions {
    /// Resolve the options from the inbound inputs
    pub fn from_inputs(inputs: &Inputs) -> Result<Self, InstallError> {
        let credentials = Credentials::new(
            inputs.get_config_value("username"),
            inputs.get_config_value("password"),
        )?;

        Ok(Self {
            credentials,
            instance: inputs.get_config_value("instance").map(str::to_string),
            workspace: inputs.get_config_value("workspace").map(PathBuf::from),
            source: inputs.get_config_value("source").unwrap_or_default().to_string(),
            output_file: inputs.get_config_value("output-file").map(PathBuf::from),
            poller: poller::Options {
                fail_trigger: inputs.is_set("fail"),
                ..Default::default()
            },
        })
    }
}

/// Logging options from the inputs; unknown levels fall back to info
pub fn log_options(inputs: &Inputs) -> LogOptions {
    LogOptions {
        log_level: inputs
            .get_config_value("log-level")
            .and_then(|level| level.parse::<LogLevel>().ok())
            .unwrap_or_default(),
        json_format: inputs.is_set("log-json"),
        ..Default::default()
    }
}
