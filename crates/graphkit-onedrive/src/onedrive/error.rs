//! Error types for the OneDrive / SharePoint Graph client.
//!
//! Every public API surface in this crate returns `OneDriveResult<T>`.
//! Callers that only care about "did the path exist" match on
//! [`OneDriveError::is_not_found`]; everything else is carried verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Convenience alias.
pub type OneDriveResult<T> = Result<T, OneDriveError>;

/// Error kinds surfaced by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OneDriveErrorCode {
    /// Malformed argument supplied by the caller (e.g. a relative path
    /// without a leading slash).
    InvalidArgument,
    /// Resource (file, folder, drive, site, share) not found (HTTP 404).
    NotFound,
    /// Token rejected (HTTP 401).
    AuthFailed,
    /// Insufficient OAuth scopes (HTTP 403).
    InsufficientPermissions,
    /// Rate-limited (HTTP 429).
    RateLimited,
    /// Bad request rejected by Graph.
    InvalidRequest,
    /// Name collision / edit conflict (HTTP 409).
    Conflict,
    /// Item is locked (HTTP 423).
    ItemLocked,
    /// Quota exceeded (HTTP 507).
    QuotaExceeded,
    /// Network / connectivity error.
    NetworkError,
    /// (De)serialization error.
    SerializationError,
    /// Server-side or otherwise unexpected failure.
    InternalError,
}

impl fmt::Display for OneDriveErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Structured error returned by every public function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneDriveError {
    pub code: OneDriveErrorCode,
    pub message: String,
    pub status: Option<u16>,
    pub graph_error_code: Option<String>,
    pub inner_message: Option<String>,
    pub request_id: Option<String>,
}

impl fmt::Display for OneDriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref gc) = self.graph_error_code {
            write!(f, " (graph: {})", gc)?;
        }
        Ok(())
    }
}

impl std::error::Error for OneDriveError {}

impl OneDriveError {
    pub fn new(code: OneDriveErrorCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            message: msg.into(),
            status: None,
            graph_error_code: None,
            inner_message: None,
            request_id: None,
        }
    }

    /// Shortcut: invalid caller argument.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(OneDriveErrorCode::InvalidArgument, msg)
    }

    /// Shortcut: not found.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(OneDriveErrorCode::NotFound, msg)
    }

    /// Shortcut: network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::new(OneDriveErrorCode::NetworkError, msg)
    }

    /// Shortcut: internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(OneDriveErrorCode::InternalError, msg)
    }

    /// Shortcut: malformed Graph response or request.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(OneDriveErrorCode::InvalidRequest, msg)
    }

    /// Whether this is the "path does not exist" condition.
    pub fn is_not_found(&self) -> bool {
        self.code == OneDriveErrorCode::NotFound
    }

    /// Whether the transport should retry the request.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.code,
            OneDriveErrorCode::RateLimited
                | OneDriveErrorCode::NetworkError
                | OneDriveErrorCode::InternalError
        )
    }

    /// Build an error from a Graph API error response body.
    pub fn from_graph_response(status: u16, body: &str) -> Self {
        let code = match status {
            401 => OneDriveErrorCode::AuthFailed,
            403 => OneDriveErrorCode::InsufficientPermissions,
            404 => OneDriveErrorCode::NotFound,
            409 => OneDriveErrorCode::Conflict,
            423 => OneDriveErrorCode::ItemLocked,
            429 => OneDriveErrorCode::RateLimited,
            507 => OneDriveErrorCode::QuotaExceeded,
            _ if status >= 500 => OneDriveErrorCode::InternalError,
            _ => OneDriveErrorCode::InvalidRequest,
        };

        let (graph_code, inner_msg, request_id) = Self::parse_graph_error_body(body);

        let message = inner_msg
            .clone()
            .unwrap_or_else(|| format!("Graph API error (HTTP {})", status));

        Self {
            code,
            message,
            status: Some(status),
            graph_error_code: graph_code,
            inner_message: inner_msg,
            request_id,
        }
    }

    /// Extract `{ "error": { "code", "message", "innerError": { "request-id" } } }`.
    fn parse_graph_error_body(body: &str) -> (Option<String>, Option<String>, Option<String>) {
        let Ok(v) = serde_json::from_str::<serde_json::Value>(body) else {
            return (None, None, None);
        };
        let err = &v["error"];
        let code = err["code"].as_str().map(String::from);
        let msg = err["message"].as_str().map(String::from);
        let req_id = err["innerError"]["request-id"].as_str().map(String::from);
        (code, msg, req_id)
    }
}

impl From<reqwest::Error> for OneDriveError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {}", err))
        } else {
            Self::internal(format!("HTTP error: {}", err))
        }
    }
}

impl From<serde_json::Error> for OneDriveError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(
            OneDriveErrorCode::SerializationError,
            format!("JSON error: {}", err),
        )
    }
}

impl From<url::ParseError> for OneDriveError {
    fn from(err: url::ParseError) -> Self {
        Self::invalid_argument(format!("URL parse error: {}", err))
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
