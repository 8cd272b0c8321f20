//! HTTP client for the forecast inference service.

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::error::ApiError;
use super::types::{
    ClassificationResponse, Framework, HealthResponse, Matrix, PredictionRequest,
    RegressionResponse, Tag,
};
use crate::defaults;
use crate::utils::Config;

/// Client for the forecast service.
///
/// Both prediction endpoints share the request/response envelope and the
/// error mapping; one call yields exactly one response. Retries, caching
/// and batching are deliberately absent.
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(defaults::TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Create a client from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_timeout(
            config.api.resolved_base_url(),
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a single regression prediction.
    pub async fn predict_regression(
        &self,
        tag: Tag,
        framework: Framework,
        x: Matrix,
    ) -> Result<RegressionResponse, ApiError> {
        self.post_prediction("/predict/regression", tag, framework, x)
            .await
    }

    /// Request a single classification prediction.
    ///
    /// Identical contract to [`predict_regression`](Self::predict_regression)
    /// against the sibling endpoint.
    pub async fn predict_classification(
        &self,
        tag: Tag,
        framework: Framework,
        x: Matrix,
    ) -> Result<ClassificationResponse, ApiError> {
        self.post_prediction("/predict/classification", tag, framework, x)
            .await
    }

    /// Ping the service health endpoint.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = format!("{}/health", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::rejection(status, body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn post_prediction<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        tag: Tag,
        framework: Framework,
        x: Matrix,
    ) -> Result<T, ApiError> {
        let request = PredictionRequest::new(tag, framework, x);
        let url = format!("{}{}", self.base_url, path);
        debug!(
            "POST {} tag={} framework={} rows={}",
            url,
            tag.as_str(),
            framework.as_str(),
            request.x.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::rejection(status, body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Strip a trailing slash so path concatenation stays predictable.
fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
