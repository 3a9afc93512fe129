//! HTTP client for the BigBlueButton API.
//!
//! Handles checksum signing, URL construction, timeout management, and the
//! request/response lifecycle. Calls are never retried.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use sha1::{Digest, Sha1};
use tracing::debug;

use bbb_core::config::{AppConfig, ServerConfig};
use bbb_core::constants;
use bbb_core::error::{BbbError, BbbResult};

use crate::response::BbbResponse;

/// Parameter list for calls that take none (e.g. `getMeetings`).
pub const NO_PARAMS: [(&str, &str); 0] = [];

/// Compute a BBB request checksum: lowercase hex `SHA1(call + query + secret)`.
pub fn checksum(call_name: &str, query_string: &str, shared_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(call_name.as_bytes());
    hasher.update(query_string.as_bytes());
    hasher.update(shared_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// HTTP client for communicating with a BigBlueButton server.
///
/// Holds no meeting state; every call asks the server afresh.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// Server base URL (e.g. "https://bbb.example.com/bigbluebutton").
    server_url: String,
    shared_secret: String,
    /// `None` when the configured timeout is 0.
    timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("server_url", &self.server_url)
            .field("shared_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiClient {
    /// Create a new ApiClient from server configuration.
    ///
    /// An empty URL or secret is not rejected here; it surfaces as a config
    /// error from the first attempt to sign a URL. A `request_timeout_ms` of 0
    /// disables the per-request timeout.
    pub fn new(config: &ServerConfig) -> BbbResult<Self> {
        let timeout = (config.request_timeout_ms > 0)
            .then(|| Duration::from_millis(config.request_timeout_ms));

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(2);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let inner = builder
            .build()
            .map_err(|e| BbbError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            server_url: AppConfig::sanitize_server_url(&config.server_url),
            shared_secret: config.shared_secret.clone(),
            timeout,
        })
    }

    /// Build a signed URL for an API call.
    ///
    /// Parameters are form-encoded in the order given. The checksum is
    /// computed over the exact query string carried by the returned URL,
    /// and `checksum` is appended as the last parameter.
    pub fn build_signed_url<I, K, V>(&self, call_name: &str, params: I) -> BbbResult<Url>
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<(K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if self.server_url.is_empty() {
            return Err(BbbError::Config("server URL is not set".into()));
        }
        if self.shared_secret.is_empty() {
            return Err(BbbError::Config("shared secret is not set".into()));
        }

        let endpoint = format!("{}/{}/{call_name}", self.server_url, constants::API_PATH);
        let mut url = Url::parse(&endpoint)
            .map_err(|e| BbbError::Config(format!("invalid server URL {endpoint}: {e}")))?;

        url.query_pairs_mut().clear().extend_pairs(params);

        let query = url.query().unwrap_or_default().to_string();
        let sum = checksum(call_name, &query, &self.shared_secret);
        url.query_pairs_mut().append_pair("checksum", &sum);

        Ok(url)
    }

    /// Issue a signed GET for an API call and return the raw XML body.
    pub async fn get_xml<I, K, V>(&self, call_name: &str, params: I) -> BbbResult<String>
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<(K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let url = self.build_signed_url(call_name, params)?;
        debug!("GET {call_name}");

        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify_error(call_name, e))?;

        let response = Self::check_status(call_name, response).await?;

        response
            .text()
            .await
            .map_err(|e| BbbError::Transport(format!("{call_name}: failed to read body: {e}")))
    }

    /// Convenience: GET + parse the common reply fields.
    pub async fn call<I, K, V>(&self, call_name: &str, params: I) -> BbbResult<BbbResponse>
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<(K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let xml = self.get_xml(call_name, params).await?;
        let parsed = BbbResponse::parse(&xml)?;
        debug!(
            "{call_name} -> {}",
            parsed.returncode.as_deref().unwrap_or("<no returncode>")
        );
        Ok(parsed)
    }

    /// Check the HTTP status code and convert to BbbError if needed.
    ///
    /// BBB reports API-level failures inside a 200 reply, so any other
    /// status means the server could not be reached properly.
    async fn check_status(call_name: &str, response: Response) -> BbbResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(BbbError::Transport(format!(
            "{call_name}: server returned {status}{}",
            if body.is_empty() { String::new() } else { format!(": {body}") }
        )))
    }

    /// Classify a reqwest error into a BbbError variant.
    fn classify_error(call_name: &str, e: reqwest::Error) -> BbbError {
        if e.is_timeout() {
            BbbError::Timeout(format!("{call_name}: {e}"))
        } else if e.is_connect() {
            BbbError::Transport(format!("{call_name}: connection failed: {e}"))
        } else {
            BbbError::Transport(format!("{call_name}: {e}"))
        }
    }
}
