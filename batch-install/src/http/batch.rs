//! Batch install API calls

use async_trait::async_trait;
use tracing::info;

use crate::errors::{ConfigErrorKind, InstallError};
use crate::http::client::HttpClient;
use crate::models::batch::{BatchResults, Payload, RemoteResult, ResultEnvelope};

/// The instance a batch is installed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    instance: String,
}

impl InstallTarget {
    pub fn new(instance: Option<&str>) -> Result<Self, ConfigErrorKind> {
        let instance = instance
            .filter(|i| !i.is_empty())
            .ok_or(ConfigErrorKind::NoInstallInstance)?;
        Ok(Self {
            instance: instance.to_string(),
        })
    }

    /// Batch install endpoint on this instance
    pub fn url(&self) -> String {
        format!(
            "https://{}.service-now.com/api/sn_cicd/app/batch/install",
            self.instance
        )
    }
}

/// Derive the batch install URL from the configured instance
pub fn build_url(instance: Option<&str>) -> Result<String, ConfigErrorKind> {
    InstallTarget::new(instance).map(|target| target.url())
}

/// Calls the poller depends on, kept behind a trait for testability
#[async_trait]
pub trait BatchApi: Send + Sync {
    /// Submit the batch and return the first status snapshot
    async fn submit(&self, payload: &Payload) -> Result<RemoteResult, InstallError>;

    /// Fetch a fresh status snapshot from a progress link
    async fn fetch_progress(&self, url: &str) -> Result<RemoteResult, InstallError>;

    /// Fetch the per-item report from a results link
    async fn fetch_results(&self, url: &str) -> Result<BatchResults, InstallError>;
}

#[async_trait]
impl BatchApi for HttpClient {
    async fn submit(&self, payload: &Payload) -> Result<RemoteResult, InstallError> {
        info!(
            "Submitting batch '{}' with {} package(s)",
            payload.name,
            payload.packages.len()
        );
        let response: ResultEnvelope<RemoteResult> = self.post(self.install_url(), payload).await?;
        Ok(response.result)
    }

    async fn fetch_progress(&self, url: &str) -> Result<RemoteResult, InstallError> {
        let response: ResultEnvelope<RemoteResult> = self.get(url).await?;
        Ok(response.result)
    }

    async fn fetch_results(&self, url: &str) -> Result<BatchResults, InstallError> {
        let response: ResultEnvelope<BatchResults> = self.get(url).await?;
        Ok(response.result)
    }
}
