//! HTTP error types
//!
//! `HttpError` is the single error shape produced by the transport layer.
//! Network failures carry status 0, server rejections carry the real status
//! and whatever body the server sent back.

use crate::types::HttpMethod;
use thiserror::Error;

/// Body of a failed response, decoded as far as it can be
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ErrorBody {
    /// No body (or a JSON `null`)
    #[default]
    Empty,
    /// A non-JSON text body
    Text(String),
    /// A JSON body
    Json(serde_json::Value),
    /// Bytes that are neither JSON nor UTF-8 text
    Unreadable(Vec<u8>),
}

impl ErrorBody {
    /// Decode raw response bytes: JSON first, then UTF-8 text, else opaque
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::Empty;
        }
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(bytes) {
            return match value {
                serde_json::Value::Null => Self::Empty,
                value => Self::Json(value),
            };
        }
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::Text(text.to_string()),
            Err(_) => Self::Unreadable(bytes.to_vec()),
        }
    }
}

/// Where in the request lifecycle a call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpFailure {
    /// No response was received
    Network,
    /// The server answered with a non-success status
    Status,
    /// A success response whose payload did not decode
    Decode,
    /// The request never left (bad URL, unencodable body)
    InvalidRequest,
}

/// A failed HTTP call
#[derive(Debug, Clone, Error)]
#[error("{method} {url} failed (status {status}): {reason}")]
pub struct HttpError {
    pub failure: HttpFailure,
    pub method: HttpMethod,
    pub url: String,
    /// HTTP status, 0 when no response was received
    pub status: u16,
    pub body: ErrorBody,
    pub reason: String,
}

impl HttpError {
    /// No response received (connection refused, DNS failure, timeout, ...)
    pub fn network(method: HttpMethod, url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            failure: HttpFailure::Network,
            method,
            url: url.into(),
            status: 0,
            body: ErrorBody::Empty,
            reason: reason.into(),
        }
    }

    /// Server answered with a non-success status
    pub fn status(method: HttpMethod, url: impl Into<String>, status: u16, body: ErrorBody) -> Self {
        Self {
            failure: HttpFailure::Status,
            method,
            url: url.into(),
            status,
            body,
            reason: "unsuccessful response".to_string(),
        }
    }

    /// Server answered successfully but the payload did not decode
    pub fn decode(
        method: HttpMethod,
        url: impl Into<String>,
        status: u16,
        source: &serde_json::Error,
    ) -> Self {
        Self {
            failure: HttpFailure::Decode,
            method,
            url: url.into(),
            status,
            body: ErrorBody::Empty,
            reason: format!("failed to decode response body: {}", source),
        }
    }

    /// The request could not be built (bad URL, bad body)
    pub fn invalid_request(
        method: HttpMethod,
        url: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            failure: HttpFailure::InvalidRequest,
            method,
            url: url.into(),
            status: 0,
            body: ErrorBody::Empty,
            reason: reason.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        self.failure == HttpFailure::Network
    }
}
