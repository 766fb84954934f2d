//! Basic-auth credentials

use secrecy::{ExposeSecret, SecretString};

use crate::errors::ConfigErrorKind;

/// Username and password used on every request.
///
/// Immutable once built; the password never shows up in `Debug` output.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Build credentials, rejecting missing or empty values
    pub fn new(username: Option<&str>, password: Option<&str>) -> Result<Self, ConfigErrorKind> {
        let username = username
            .filter(|u| !u.is_empty())
            .ok_or(ConfigErrorKind::Username)?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or(ConfigErrorKind::Password)?;

        Ok(Self {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}
