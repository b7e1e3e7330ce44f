//! Credential lifecycle manager.
//!
//! State machine over the single credential slot: a persisted token starts
//! unverified, is confirmed by probing an authenticated endpoint, and is
//! renewed through a fresh login exchange when absent or rejected. Every
//! authenticated call follows the retry-once rule: on a 401, discard the
//! credential, renew exactly once, retry exactly once; a second 401 is
//! terminal. Renewal is single-flight — concurrent callers that detect an
//! invalid credential wait for the in-flight login instead of issuing their
//! own.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use reel_core::error::{GatewayError, GatewayResult};
use reel_core::types::Credential;

use crate::store::TokenStore;

const LOGIN_PATH: &str = "/auth/token/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the protected backend
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Backend base URL
    pub base_url: String,
    /// Username for the login exchange
    pub username: String,
    /// Password for the login exchange
    pub password: String,
    /// Authenticated endpoint probed to confirm a cached token
    pub probe_path: String,
}

/// Manages the acquisition, validation and renewal of the bearer credential
pub struct CredentialManager {
    client: Client,
    settings: BackendSettings,
    store: TokenStore,
    /// In-memory token snapshot; reads are lock-free from the caller's view
    token: RwLock<Option<String>>,
    /// Serializes renewal so concurrent callers share one login exchange
    renewal: Mutex<()>,
}

impl CredentialManager {
    /// Create a manager, reading any persisted credential into the
    /// unverified in-memory slot.
    pub fn new(settings: BackendSettings, store: TokenStore) -> GatewayResult<Self> {
        let client = ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("reelgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::network(format!("failed to create HTTP client: {}", e)))?;

        let cached = store.load().map(|credential| credential.token);
        Ok(Self {
            client,
            settings,
            store,
            token: RwLock::new(cached),
            renewal: Mutex::new(()),
        })
    }

    /// Lock-free snapshot of the current token
    pub fn current_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Return a token confirmed to be valid, renewing if needed.
    ///
    /// A cached token is verified against the probe endpoint before being
    /// handed out; a rejected or absent token triggers one login exchange.
    /// A failed login is fatal to the calling operation.
    pub async fn ensure_token(&self) -> GatewayResult<String> {
        match self.current_token() {
            Some(token) => {
                if self.probe(&token).await? {
                    debug!("cached token confirmed by probe");
                    return Ok(token);
                }
                info!("cached token rejected, renewing");
                self.renew(Some(&token)).await
            }
            None => self.renew(None).await,
        }
    }

    /// Drop the credential from memory and disk
    pub fn invalidate(&self) -> GatewayResult<()> {
        self.set_current(None);
        self.store.clear()
    }

    /// Perform an authenticated request, applying the retry-once rule.
    ///
    /// The current token is attached as a bearer credential; on a 401 the
    /// stored credential is discarded, renewed exactly once, and the call
    /// retried exactly once. A second 401 surfaces as `AuthFailed`.
    pub async fn call_authenticated(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> GatewayResult<Value> {
        let token = match self.current_token() {
            Some(token) => token,
            None => self.renew(None).await?,
        };

        let mut response = self.send(method.clone(), path, body, &token).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(path, "token rejected mid-session, renewing once");
            let fresh = self.renew(Some(&token)).await?;
            response = self.send(method, path, body, &fresh).await?;
            if response.status() == StatusCode::UNAUTHORIZED {
                return Err(GatewayError::AuthFailed {
                    detail: "token rejected again after renewal".to_string(),
                });
            }
        }

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(&response);
            return Err(GatewayError::RateLimited { retry_after });
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let status_code = status.as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|_| GatewayError::InvalidPayload {
            status: status_code,
        })
    }

    /// Renew the credential, single-flight.
    ///
    /// `stale` is the token the caller observed failing; if a concurrent
    /// renewal already replaced it by the time the lock is acquired, the
    /// fresh token is reused instead of performing another login exchange.
    async fn renew(&self, stale: Option<&str>) -> GatewayResult<String> {
        let _guard = self.renewal.lock().await;

        if let Some(current) = self.current_token() {
            if stale != Some(current.as_str()) {
                debug!("reusing token renewed by a concurrent caller");
                return Ok(current);
            }
        }

        self.set_current(None);
        self.store.clear()?;

        let token = self.login().await?;
        self.store.save(&Credential::new(token.clone()))?;
        self.set_current(Some(token.clone()));
        info!("obtained new access token");
        Ok(token)
    }

    /// Exchange configured credentials for a fresh token
    async fn login(&self) -> GatewayResult<String> {
        if self.settings.username.is_empty() {
            return Err(GatewayError::AuthFailed {
                detail: "no backend credentials configured".to_string(),
            });
        }

        let url = format!("{}{}", self.settings.base_url.trim_end_matches('/'), LOGIN_PATH);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "username": self.settings.username,
                "password": self.settings.password,
            }))
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::AuthFailed {
                detail: format!("login exchange returned status {}: {}", status, detail),
            });
        }

        let status_code = status.as_u16();
        let payload: Value = response
            .json()
            .await
            .map_err(|_| GatewayError::InvalidPayload {
                status: status_code,
            })?;
        payload["access"]
            .as_str()
            .map(str::to_string)
            .ok_or(GatewayError::InvalidPayload {
                status: status_code,
            })
    }

    /// Empirically check a token against the probe endpoint. Any non-success
    /// answer reads as invalid, matching how the backend treats stale
    /// tokens; transport failures propagate.
    async fn probe(&self, token: &str) -> GatewayResult<bool> {
        let url = format!(
            "{}{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.probe_path
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;
        Ok(response.status().is_success())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: &str,
    ) -> GatewayResult<reqwest::Response> {
        let url = format!("{}{}", self.settings.base_url.trim_end_matches('/'), path);
        let mut request = self.client.request(method, &url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))
    }

    fn set_current(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

/// Parse a server-advertised Retry-After hint (delay-seconds form only)
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
