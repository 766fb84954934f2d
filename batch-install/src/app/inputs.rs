//! Inbound configuration values

use std::collections::HashMap;

/// Logical input names and the environment variables that feed them
pub const ENV_BINDINGS: &[(&str, &str)] = &[
    ("username", "nowUsername"),
    ("password", "nowPassword"),
    ("instance", "nowInstallInstance"),
    ("workspace", "GITHUB_WORKSPACE"),
    ("source", "INPUT_SOURCE"),
    ("filename", "INPUT_FILENAME"),
    ("manifest", "INPUT_MANIFEST"),
    ("fail", "fail"),
    ("log-level", "LOG_LEVEL"),
    ("output-file", "GITHUB_OUTPUT"),
];

/// Resolved input values, looked up by logical name
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    values: HashMap<String, String>,
}

impl Inputs {
    /// Build inputs from `--key=value` arguments layered over environment variables.
    ///
    /// Arguments win over the environment. Standalone `--flag` arguments are
    /// recorded as `"true"`.
    pub fn from_sources<A, E>(args: A, env: E) -> Self
    where
        A: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut values: HashMap<String, String> = HashMap::new();

        for &(name, var) in ENV_BINDINGS {
            if let Some(value) = env(var) {
                values.insert(name.to_string(), value);
            }
        }

        for arg in args {
            if let Some((key, value)) = arg.split_once('=') {
                let clean_key = key.trim_start_matches('-');
                values.insert(clean_key.to_string(), value.to_string());
            } else if arg.starts_with("--") {
                let clean_key = arg.trim_start_matches('-');
                values.insert(clean_key.to_string(), "true".to_string());
            }
        }

        Self { values }
    }

    /// Inputs from the process arguments and environment
    pub fn from_env() -> Self {
        Self::from_sources(std::env::args().skip(1), |var| std::env::var(var).ok())
    }

    /// Inputs from explicit pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Value of a named input; empty values count as absent
    pub fn get_config_value(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Whether a flag input is exactly `"true"`
    pub fn is_set(&self, name: &str) -> bool {
        self.get_config_value(name) == Some("true")
    }
}
