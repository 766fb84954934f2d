//! HTTP client implementation

use std::time::Duration;

use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::authn::credentials::Credentials;
use crate::errors::InstallError;
use crate::http::classify::{classify, HttpFailure};
use crate::models::batch::{ErrorResult, ResultEnvelope};

/// User agent the CI/CD API expects from this integration
pub const USER_AGENT: &str = "sncicd_extint_github";

/// Authenticated HTTP client for the CI/CD API
pub struct HttpClient {
    client: Client,
    credentials: Credentials,
    install_url: String,
}

impl HttpClient {
    /// Create a client that submits batches to `install_url`
    pub fn new(install_url: impl Into<String>, credentials: Credentials) -> Result<Self, InstallError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            credentials,
            install_url: install_url.into(),
        })
    }

    /// Get the batch install URL
    pub fn install_url(&self) -> &str {
        &self.install_url
    }

    /// Make a GET request against an absolute URL
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, InstallError> {
        debug!("GET {}", url);
        let request = self.authorized(self.client.get(url));
        self.send(request, "GET").await
    }

    /// Make a POST request with a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, InstallError> {
        debug!("POST {}", url);
        let request = self.authorized(self.client.post(url)).json(body);
        self.send(request, "POST").await
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(self.credentials.username(), Some(self.credentials.password()))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &str,
    ) -> Result<T, InstallError> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(method, HttpFailure::network(e.to_string())))?;

        if !response.status().is_success() {
            let failure = read_failure(response).await;
            return Err(transport_error(method, failure));
        }

        response
            .json()
            .await
            .map_err(|e| transport_error(method, HttpFailure::network(e.to_string())))
    }
}

async fn read_failure(response: Response) -> HttpFailure {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let remote = serde_json::from_str::<ResultEnvelope<ErrorResult>>(&body)
        .ok()
        .map(|envelope| envelope.result);

    HttpFailure {
        status: Some(status),
        remote,
        message: format!("Request failed with status code {}", status.as_u16()),
    }
}

fn transport_error(method: &str, failure: HttpFailure) -> InstallError {
    let message = classify(&failure);
    error!("HTTP {} failed: {}", method, message);
    InstallError::Transport(message)
}
