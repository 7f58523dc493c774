//! # Client Error Types
//!
//! One error type, [`ApiError`], for every client in this crate.
//!
//! ## Error Categories
//!
//! - **RequestRejected**: the backend answered with a non-2xx status. The
//!   server's JSON error body is kept verbatim in `payload`.
//! - **TransportFailure**: the HTTP exchange did not complete (connection
//!   refused, DNS, timeout, interrupted body).
//! - **InvalidResponse**: a 2xx body that does not decode into the expected
//!   result type.
//! - **InvalidInput**: a local precondition failed; no request was sent.
//! - **Config**: the client could not be constructed.
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use chat_client::core::error::ApiError;
//!
//! fn describe(err: &ApiError) -> String {
//!     match err {
//!         ApiError::RequestRejected { .. } if err.is_not_found() => "gone".to_string(),
//!         ApiError::RequestRejected { .. } => err.message().unwrap_or("rejected").to_string(),
//!         other => other.to_string(),
//!     }
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failure of a client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the request with a non-success status.
    #[error("Request rejected with status {status}: {}", summarize(.payload))]
    RequestRejected {
        status: u16,
        /// Error body as sent by the server. Non-JSON bodies are kept as a
        /// JSON string.
        payload: Value,
    },

    /// The request never produced a response.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// The response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rejected locally before any request was issued.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client construction or configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server payload of a rejected request.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::RequestRejected { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Human-readable message from the server payload.
    ///
    /// Looks at `message` first, then `error`, then a bare string body.
    pub fn message(&self) -> Option<&str> {
        self.payload().and_then(payload_message)
    }

    /// Machine-readable `code` field of the server payload, if any.
    pub fn code(&self) -> Option<&str> {
        self.payload()?.get("code")?.as_str()
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ApiError::RequestRejected { .. })
    }
}

fn payload_message(payload: &Value) -> Option<&str> {
    match payload {
        Value::String(text) => Some(text.as_str()),
        Value::Object(fields) => fields
            .get("message")
            .or_else(|| fields.get("error"))
            .and_then(Value::as_str),
        _ => None,
    }
}

fn summarize(payload: &Value) -> String {
    match payload_message(payload) {
        Some(message) => message.to_string(),
        None => payload.to_string(),
    }
}

/// DTO constructors report violations as plain strings.
impl From<String> for ApiError {
    fn from(msg: String) -> Self {
        ApiError::InvalidInput(msg)
    }
}
