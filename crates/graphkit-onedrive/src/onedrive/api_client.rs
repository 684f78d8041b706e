//! HTTP client for the Microsoft Graph API.
//!
//! Wraps `reqwest::Client` with Bearer-token injection, retry with
//! exponential back-off for transient failures (429 / 5xx / connectivity)
//! and JSON envelope parsing.

use crate::onedrive::error::{OneDriveError, OneDriveResult};
use crate::onedrive::types::OneDriveConfig;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;

/// Low-level Graph API HTTP client.
#[derive(Debug, Clone)]
pub struct GraphApiClient {
    inner: reqwest::Client,
    base_url: String,
    access_token: String,
    max_retries: u32,
}

impl GraphApiClient {
    pub fn new(config: &OneDriveConfig, access_token: &str) -> OneDriveResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .default_headers(headers)
            .build()
            .map_err(|e| OneDriveError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            inner,
            base_url: config.graph_base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            max_retries: config.max_retries,
        })
    }

    /// Replace the access token (the caller owns token refresh).
    pub fn set_access_token(&mut self, token: &str) {
        self.access_token = token.to_string();
    }

    /// Full URL for a Graph endpoint path. Absolute URLs (e.g. an
    /// `@odata.nextLink`) are returned unchanged.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// GET with optional query parameters.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> OneDriveResult<serde_json::Value> {
        let url = self.url(path);
        debug!("GET {}", url);
        self.request_with_retry(|| {
            self.inner
                .get(&url)
                .bearer_auth(&self.access_token)
                .query(query)
        })
        .await
    }

    /// GET raw bytes (for downloads).
    pub async fn get_bytes(&self, path: &str) -> OneDriveResult<Vec<u8>> {
        let url = self.url(path);
        debug!("GET (bytes) {}", url);

        let resp = self
            .inner
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(OneDriveError::from)?;

        let status = resp.status().as_u16();
        if status >= 400 {
            let body = resp.text().await.unwrap_or_default();
            return Err(OneDriveError::from_graph_response(status, &body));
        }

        resp.bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(OneDriveError::from)
    }

    // ─── Internal ────────────────────────────────────────────────────

    async fn request_with_retry<F>(
        &self,
        build: impl Fn() -> F,
    ) -> OneDriveResult<serde_json::Value>
    where
        F: Into<reqwest::RequestBuilder>,
    {
        let mut last_err = OneDriveError::internal("No attempts made");

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!("Retry {}/{} after {:?}", attempt, self.max_retries, delay);
                tokio::time::sleep(delay).await;
            }

            let req: reqwest::RequestBuilder = build().into();
            match req.send().await {
                Ok(resp) => match Self::handle_response(resp).await {
                    Ok(v) => return Ok(v),
                    Err(e) if e.is_transient() && attempt < self.max_retries => {
                        last_err = e;
                    }
                    Err(e) => return Err(e),
                },
                Err(e) => {
                    last_err = OneDriveError::from(e);
                }
            }
        }

        Err(last_err)
    }

    async fn handle_response(resp: reqwest::Response) -> OneDriveResult<serde_json::Value> {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        debug!("Response status={} body_len={}", status, body.len());

        if status >= 400 {
            return Err(OneDriveError::from_graph_response(status, &body));
        }

        // 204 No Content
        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&body).map_err(OneDriveError::from)
    }
}

/// Delay before retry `attempt` (1-based): 500ms, 1s, 2s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(500 * 2u64.pow(attempt.saturating_sub(1)))
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
