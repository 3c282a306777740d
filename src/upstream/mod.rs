//! Client for the upstream random-question provider.
//!
//! Wraps `GET <base>/random?count=<n>` with a bounded timeout and maps
//! transport failures and non-success statuses to application errors.

use std::time::Duration;

use crate::errors::AppError;
use crate::models::FetchedCandidate;

/// HTTP client for the question provider.
pub struct UpstreamClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl UpstreamClient {
    /// Create a client for the given provider base URL with a per-call timeout.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Fetch `count` random questions from the provider.
    ///
    /// The provider may legitimately return fewer items than asked for.
    pub async fn fetch_random(&self, count: u32) -> Result<Vec<FetchedCandidate>, AppError> {
        let url = format!("{}/random?count={}", self.base_url, count);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::error!("Provider call timed out: {}", e);
                AppError::UpstreamTimeout("Gateway timeout in request to provider".to_string())
            } else {
                tracing::error!("Provider call failed: {}", e);
                AppError::UpstreamUnavailable(format!("Provider request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Provider answered with status {}", status);
            return Err(AppError::UpstreamUnavailable(format!(
                "Failed to fetch questions from the provider (status {})",
                status
            )));
        }

        let candidates: Vec<FetchedCandidate> = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AppError::UpstreamTimeout("Gateway timeout in request to provider".to_string())
            } else {
                AppError::UpstreamUnavailable(format!("Failed to decode provider response: {}", e))
            }
        })?;

        tracing::debug!("Provider returned {} candidate(s)", candidates.len());
        Ok(candidates)
    }
}
