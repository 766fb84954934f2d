//! Error types for the batch installer

use thiserror::Error;

/// Configuration problems detected before or while building the request.
///
/// These are never retried; the message is surfaced verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    #[error("nowUsername is not set")]
    Username,

    #[error("nowPassword is not set")]
    Password,

    #[error("nowInstallInstance is not set")]
    NoInstallInstance,

    #[error("Payload is empty, corrupted or not set")]
    MissingPayload,

    #[error("GITHUB_WORKSPACE env not found")]
    NoWorkspace,

    #[error("Manifest source is not supported")]
    WrongSource,
}

/// Main error type for the batch installer
#[derive(Error, Debug)]
pub enum InstallError {
    #[error(transparent)]
    Config(#[from] ConfigErrorKind),

    /// HTTP or network failure, already classified into a readable message
    #[error("{0}")]
    Transport(String),

    /// The remote batch finished in the failed state
    #[error("{0}")]
    RemoteFailure(String),

    #[error("Canceled")]
    Cancelled,

    /// Raised by the `fail=true` diagnostic switch once a terminal state is reached
    #[error("Triggered step fail")]
    TriggeredFailure,

    #[error("Remote result is missing the {0} link")]
    MissingLink(&'static str),

    #[error("Unable to write output: {0}")]
    Output(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
