use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::errors::ApiError;

pub mod types;

use types::*;

/// Provider credential. Wiped from memory on drop and never printed.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Wrap a credential; blank values count as no credential.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(Zeroizing::new(trimmed.to_string())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Trait abstraction over the text-generation service, enabling test doubles.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Single call-and-response generation.
    async fn generate_content(
        &self,
        api_key: &ApiKey,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

/// Retry configuration for transient provider failures
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial delay between retries (doubles each attempt)
    pub initial_delay_ms: u64,
    /// Maximum delay between retries
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay_ms: 500,
            max_delay_ms: 8000,
        }
    }
}

impl RetryConfig {
    pub fn from_settings(settings: &crate::config::RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            initial_delay_ms: settings.base_delay_ms,
            max_delay_ms: settings.max_delay_ms,
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        let ms = self
            .initial_delay_ms
            .saturating_mul(factor)
            .min(self.max_delay_ms);
        Duration::from_millis(ms)
    }
}

/// reqwest client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl GeminiClient {
    pub fn new(config: &crate::config::Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .connect_timeout(Duration::from_secs(15))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            retry_config: RetryConfig::from_settings(&config.retry),
        })
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Send request with exponential backoff on transient failures
    async fn send_with_retry(
        &self,
        api_key: &ApiKey,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.url_for(model);
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..=self.retry_config.max_retries {
            if attempt > 0 {
                let delay = self.retry_config.delay_for(attempt);
                warn!(
                    "Retry attempt {}/{} after {}ms delay",
                    attempt,
                    self.retry_config.max_retries,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            debug!("Sending request to {} (attempt {})", url, attempt + 1);

            let result = self
                .client
                .post(&url)
                .header("x-goog-api-key", api_key.expose())
                .json(body)
                .send()
                .await;

            let response = match result {
                Ok(response) => response,
                Err(e) if e.is_timeout() => {
                    warn!("Request timed out (retrying)");
                    last_error = Some(ApiError::Timeout);
                    continue;
                }
                Err(e) if e.is_connect() => {
                    warn!("Connection failed (retrying): {}", e);
                    last_error = Some(ApiError::Network(e.to_string()));
                    continue;
                }
                Err(e) => return Err(ApiError::Network(e.to_string()).into()),
            };

            let status = response.status();
            if status.is_success() {
                let body_text = response
                    .text()
                    .await
                    .map_err(|e| ApiError::Network(e.to_string()))?;
                debug!("API response body ({} chars)", body_text.len());
                let parsed: GenerateContentResponse = serde_json::from_str(&body_text)
                    .map_err(|e| ApiError::Parse(e.to_string()))?;
                return Ok(parsed);
            }

            let retry_after = retry_after_secs(&response);
            let error_text = response.text().await.unwrap_or_default();
            let error = ApiError::from_status(status.as_u16(), error_text, retry_after);

            if !error.is_transient() {
                return Err(error.into());
            }

            warn!("Retryable error ({}): {}", status, error);
            if status == StatusCode::TOO_MANY_REQUESTS {
                if let Some(secs) = retry_after {
                    tokio::time::sleep(Duration::from_secs(secs.min(30))).await;
                }
            }
            last_error = Some(error);
        }

        Err(last_error
            .map(anyhow::Error::from)
            .unwrap_or_else(|| anyhow::anyhow!("Request failed after retries")))
    }
}

fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &ApiKey,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.send_with_retry(api_key, model, &request).await
    }
}
