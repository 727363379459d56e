//! HTTP client for the remote classification service
//!
//! Endpoints:
//! - `GET /`         liveness probe, any 2xx means online
//! - `GET /format`   field descriptions
//! - `POST /predict` classification of one metrics record

use super::types::{FormatHints, FormatResponse, PredictResponse};
use super::PredictionService;
use crate::errors::{PredictorError, Result};
use crate::metrics::NetworkMetrics;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default service endpoint
pub const DEFAULT_SERVICE_URL: &str = "https://netwok-api.onrender.com";

/// Default per-request timeout. Free-tier hosts can take close to a minute
/// to wake from sleep.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// reqwest-backed classification client
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: Client,
    base_url: String,
}

impl HttpPredictionClient {
    /// Create client with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT_SECS)
    }

    /// Create client for a custom base URL. A timeout of 0 disables it.
    pub fn with_config(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let mut builder = Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder.build().map_err(PredictorError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn probe(&self) -> Result<()> {
        let url = self.endpoint("");
        tracing::debug!(%url, "liveness probe");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PredictorError::ProbeFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PredictorError::ProbeFailed(format!(
                "server answered {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn fetch_format(&self) -> Result<FormatHints> {
        let url = self.endpoint("format");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(PredictorError::FormatUnavailable(format!(
                "HTTP error! status: {}",
                response.status().as_u16()
            )));
        }

        let format: FormatResponse = response.json().await?;
        Ok(format.expected_format)
    }

    async fn predict(&self, metrics: &NetworkMetrics) -> Result<Vec<f64>> {
        let url = self.endpoint("predict");
        tracing::debug!(%url, ?metrics, "submitting metrics");

        let response = self
            .client
            .post(&url)
            .json(metrics)
            .send()
            .await
            .map_err(|e| PredictorError::PredictionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PredictorError::PredictionFailed(format!(
                "HTTP error! status: {}",
                response.status().as_u16()
            )));
        }

        let result: PredictResponse = response
            .json()
            .await
            .map_err(|e| PredictorError::PredictionFailed(e.to_string()))?;

        Ok(result.prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpPredictionClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = HttpPredictionClient::with_config("http://localhost:8000/", 0).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint("predict"), "http://localhost:8000/predict");
        assert_eq!(client.endpoint(""), "http://localhost:8000/");
    }
}
