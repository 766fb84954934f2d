//! Batch install models

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of installable package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Application,
    Plugin,
}

/// One installable unit within a batch.
///
/// Version fields are kept as raw JSON so numeric values are forwarded unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// sys_id of the application or plugin
    pub id: String,

    #[serde(rename = "type")]
    pub package_type: PackageType,

    /// Required for applications, ignored for plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_version: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_customization_version: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_demo_data: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Package fields the installer does not interpret but must forward
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The batch install manifest, sent verbatim as the request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub packages: Vec<Package>,

    /// Fields the installer does not interpret but must forward
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Wrapper every endpoint puts around its body
#[derive(Debug, Clone, Deserialize)]
pub struct ResultEnvelope<T> {
    pub result: T,
}

/// Remote batch status, ordered as the API numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BatchStatus {
    Pending = 0,
    Running = 1,
    Successful = 2,
    Failed = 3,
    Canceled = 4,
}

impl BatchStatus {
    /// All statuses in ascending order
    pub const ALL: [BatchStatus; 5] = [
        BatchStatus::Pending,
        BatchStatus::Running,
        BatchStatus::Successful,
        BatchStatus::Failed,
        BatchStatus::Canceled,
    ];

    pub fn code(self) -> f64 {
        self as u8 as f64
    }

    /// Look up the status with exactly this numeric code
    pub fn from_code(code: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Codes below `Successful` mean the batch is still in progress
    pub fn is_in_progress(code: f64) -> bool {
        code < BatchStatus::Successful.code()
    }
}

/// A named link inside a status snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Links carried by a status snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub progress: Option<Link>,

    #[serde(default)]
    pub results: Option<Link>,

    #[serde(default)]
    pub rollback: Option<Link>,
}

fn link_url(link: &Option<Link>) -> Option<&str> {
    link.as_ref()
        .and_then(|l| l.url.as_deref())
        .filter(|url| !url.is_empty())
}

impl Links {
    pub fn progress_url(&self) -> Option<&str> {
        link_url(&self.progress)
    }

    pub fn results_url(&self) -> Option<&str> {
        link_url(&self.results)
    }

    pub fn rollback_url(&self) -> Option<&str> {
        link_url(&self.rollback)
    }
}

/// Status snapshot returned by the submission and by every progress poll
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteResult {
    #[serde(default)]
    pub links: Links,

    /// Transmitted as a string, compared numerically
    #[serde(default, deserialize_with = "string_or_number")]
    pub status: String,

    #[serde(default)]
    pub status_label: String,

    #[serde(default)]
    pub status_message: String,

    #[serde(default)]
    pub status_detail: String,

    #[serde(default)]
    pub error: String,

    #[serde(default)]
    pub percent_complete: Option<serde_json::Number>,
}

impl RemoteResult {
    /// Numeric value of the status.
    ///
    /// Surrounding whitespace is ignored and an empty string counts as 0.
    /// Returns `None` when the status is not a finite number.
    pub fn status_code(&self) -> Option<f64> {
        let trimmed = self.status.trim();
        if trimmed.is_empty() {
            return Some(0.0);
        }
        trimmed.parse::<f64>().ok().filter(|code| code.is_finite())
    }

    /// The known status this snapshot reports, if any
    pub fn batch_status(&self) -> Option<BatchStatus> {
        self.status_code().and_then(BatchStatus::from_code)
    }

    pub fn is_in_progress(&self) -> bool {
        self.status_code().is_some_and(BatchStatus::is_in_progress)
    }

    /// Percent complete as the remote sent it
    pub fn percent(&self) -> String {
        self.percent_complete
            .as_ref()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "0".to_string())
    }

    /// `error` when set, `status_message` otherwise
    pub fn failure_reason(&self) -> &str {
        if self.error.is_empty() {
            &self.status_message
        } else {
            &self.error
        }
    }
}

/// Error body returned alongside a non-success HTTP status
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResult {
    #[serde(default, deserialize_with = "string_or_number")]
    pub status: String,

    #[serde(default)]
    pub status_label: String,

    #[serde(default)]
    pub status_message: String,

    #[serde(default)]
    pub status_detail: String,

    #[serde(default)]
    pub error: String,
}

impl ErrorResult {
    /// `error` when set, `status_message` otherwise; `None` when both are empty
    pub fn message(&self) -> Option<&str> {
        [self.error.as_str(), self.status_message.as_str()]
            .into_iter()
            .find(|m| !m.is_empty())
    }
}

/// Summary of the batch plan in the results report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchPlan {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Per-package outcome in the results report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchItem {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub item_id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "type")]
    pub item_type: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub status_message: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub customization_version: Option<String>,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub notes: Option<String>,
}

impl BatchItem {
    /// `"{name}: {state}. {status_message}"`, using the id when the name is absent
    pub fn summary_line(&self) -> String {
        let name = self.name.as_deref().unwrap_or(&self.id);
        format!("{}: {}. {}", name, self.state, self.status_message)
    }
}

/// Detailed per-item outcome of a finished batch
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchResults {
    #[serde(default)]
    pub batch_plan: Option<BatchPlan>,

    #[serde(default)]
    pub batch_items: Vec<BatchItem>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number status, got {}",
            other
        ))),
    }
}
