//! Maps HTTP failures to readable messages

use http::StatusCode;

use crate::models::batch::ErrorResult;

/// Canned messages for status codes the CI/CD API documents
pub const STATUS_MESSAGES: &[(u16, &str)] = &[
    (401, "The user credentials are incorrect."),
    (403, "Forbidden. The user is not an admin or does not have the CICD role."),
    (404, "Not found. The requested item was not found."),
    (405, "Invalid method. The functionality is disabled."),
    (409, "Conflict. The requested item is not unique."),
    (500, "Internal server error. An unexpected error occurred while processing the request."),
];

/// A failed HTTP exchange, before classification
#[derive(Debug, Clone, Default)]
pub struct HttpFailure {
    /// Response status, absent for network-level failures
    pub status: Option<StatusCode>,

    /// Parsed `result` object of the error body, if there was one
    pub remote: Option<ErrorResult>,

    /// Raw failure description
    pub message: String,
}

impl HttpFailure {
    /// A failure that never produced a response
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            remote: None,
            message: message.into(),
        }
    }
}

/// Canned message for a status code, if it has one
pub fn canned_message(status: StatusCode) -> Option<&'static str> {
    STATUS_MESSAGES
        .iter()
        .find(|(code, _)| *code == status.as_u16())
        .map(|(_, message)| *message)
}

/// Turn a failure into the message shown to the user.
///
/// Order: canned status message, then the remote `error` / `status_message`,
/// then the raw failure message.
pub fn classify(failure: &HttpFailure) -> String {
    if let Some(message) = failure.status.and_then(canned_message) {
        return message.to_string();
    }

    if let Some(message) = failure.remote.as_ref().and_then(ErrorResult::message) {
        return message.to_string();
    }

    failure.message.clone()
}
