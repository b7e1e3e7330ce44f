//! Resilient HTTP transport with bounded retry and backoff.
//!
//! Wraps a pooled `reqwest` client and classifies every upstream response
//! into the `GatewayError` taxonomy. Only classified-transient failures are
//! retried; a 429 is surfaced immediately with its retry-after hint so the
//! caller decides whether to back off.

use std::cmp;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use reel_core::error::{GatewayError, GatewayResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for exponential backoff retry logic
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first try
    pub max_retries: u32,
    /// Initial delay before first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
    /// Fixed per-request timeout
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(600),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP transport for upstream catalog operations.
///
/// Attaches the shared API key and locale to every outbound request and
/// fails fast with `Unconfigured` when the key is absent, before any
/// network I/O.
#[derive(Debug, Clone)]
pub struct Transport {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Upstream base URL
    base_url: String,
    /// API key attached to every request; empty means unconfigured
    api_key: String,
    /// Locale attached to every request
    language: String,
    /// Retry configuration
    retry: RetryPolicy,
}

impl Transport {
    /// Create a transport with the default retry policy
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        language: impl Into<String>,
    ) -> GatewayResult<Self> {
        Self::with_policy(base_url, api_key, language, RetryPolicy::default())
    }

    /// Create a transport with a custom retry policy
    pub fn with_policy(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        language: impl Into<String>,
        retry: RetryPolicy,
    ) -> GatewayResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(retry.request_timeout)
            .gzip(true)
            .user_agent(concat!("reelgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            language: language.into(),
            retry,
        })
    }

    /// The configured retry policy
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Perform a GET against an upstream path, returning the parsed JSON
    /// payload or a classified error.
    ///
    /// Retries apply only to connection failures and transient server
    /// statuses (500/502/503/504); everything else is returned after the
    /// first attempt.
    pub async fn get_json(&self, path: &str, params: &[(&str, String)]) -> GatewayResult<Value> {
        if self.api_key.is_empty() {
            return Err(GatewayError::Unconfigured);
        }

        let url = self.endpoint(path)?;
        self.with_retry(|| self.attempt(&url, params)).await
    }

    /// Execute an operation with exponential backoff retry logic
    async fn with_retry<F, Fut, T>(&self, operation: F) -> GatewayResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = GatewayResult<T>>,
    {
        let mut delay = self.retry.initial_delay;
        let mut last_error = None;

        for attempt in 0..=self.retry.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    let retryable = error.is_transient();
                    last_error = Some(error);

                    if !retryable || attempt == self.retry.max_retries {
                        break;
                    }

                    debug!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "transient upstream failure, backing off"
                    );
                    tokio::time::sleep(delay).await;

                    delay = cmp::min(delay.mul_f64(self.retry.multiplier), self.retry.max_delay);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| GatewayError::network("retry loop ended without an error")))
    }

    /// One attempt: send the request and classify the outcome
    async fn attempt(&self, url: &Url, params: &[(&str, String)]) -> GatewayResult<Value> {
        let mut query: Vec<(&str, &str)> = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        query.extend(params.iter().map(|(name, value)| (*name, value.as_str())));

        let response = self
            .client
            .get(url.clone())
            .query(&query)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        let status = response.status();

        // Rate limiting is surfaced, never retried transparently
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(&response);
            warn!(%url, ?retry_after, "upstream rate limited");
            return Err(GatewayError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "upstream error");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let status_code = status.as_u16();
        response
            .json::<Value>()
            .await
            .map_err(|_| GatewayError::InvalidPayload {
                status: status_code,
            })
    }

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        let joined = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        Url::parse(&joined)
            .map_err(|e| GatewayError::config("upstream.base_url", e.to_string()))
    }
}

/// Parse a server-advertised Retry-After hint. Only the delay-seconds form
/// is honored; the HTTP-date form is treated as an absent hint.
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
