//! Error classification
//!
//! Maps any failure the application can observe to a stable taxonomy
//! branch and a short, human-readable message. Classification never
//! panics: unrecognised or malformed input degrades to a generic message.
//!
//! # Decision order (first match wins)
//!
//! 0. undecodable payloads and requests that never left → the generic default
//! 1. HTTP error while offline → "You appear to be offline."
//! 2. status 0 → "Network error. Please try again."
//! 3. 401 / 403 / 404 / ≥ 500 → fixed messages
//! 4. other statuses → server-supplied message, else "Request failed (status)."
//! 5. non-HTTP errors → their message, else the generic default
//! 6. anything else → the generic default

use crate::error::{ErrorBody, HttpError, HttpFailure};
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const OFFLINE_MESSAGE: &str = "You appear to be offline.";
pub const NETWORK_MESSAGE: &str = "Network error. Please try again.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in.";
pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to perform this action.";
pub const NOT_FOUND_MESSAGE: &str = "Not found.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
pub const DEFAULT_MESSAGE: &str = "An unexpected error occurred.";

/// Taxonomy branch of a classified error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Offline,
    Network,
    SessionExpired,
    PermissionDenied,
    NotFound,
    Server,
    /// Validation / other 4xx answers
    Client,
    /// Non-HTTP error, or a value that is not an error at all
    Unknown,
    /// Error body could not be rendered to text
    Serialization,
}

/// Result of classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClassifiedError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn unknown() -> Self {
        Self::new(ErrorKind::Unknown, DEFAULT_MESSAGE)
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Reports whether the network is reachable
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Shared online/offline flag
///
/// Starts online. The reqwest transport flips it to offline when a host
/// name cannot be resolved and back to online as soon as any response
/// arrives. Refused or reset connections leave it untouched.
#[derive(Debug, Clone)]
pub struct ConnectivityFlag {
    online: Arc<AtomicBool>,
}

impl Default for ConnectivityFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityFlag {
    pub fn new() -> Self {
        Self {
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_online(&self, online: bool) {
        let was = self.online.swap(online, Ordering::SeqCst);
        if was != online {
            log::info!(
                "Connectivity changed: {}",
                if online { "online" } else { "offline" }
            );
        }
    }
}

impl Connectivity for ConnectivityFlag {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

/// Turns errors into user-facing messages
#[derive(Clone)]
pub struct ErrorClassifier {
    connectivity: Arc<dyn Connectivity>,
}

impl fmt::Debug for ErrorClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorClassifier")
            .field("online", &self.connectivity.is_online())
            .finish()
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new(Arc::new(ConnectivityFlag::new()))
    }
}

impl ErrorClassifier {
    pub fn new(connectivity: Arc<dyn Connectivity>) -> Self {
        Self { connectivity }
    }

    /// Classify an application error; HTTP errors are found through downcasting
    pub fn classify(&self, error: &anyhow::Error) -> ClassifiedError {
        if let Some(http) = error.downcast_ref::<HttpError>() {
            return self.classify_http(http);
        }
        let message = error.to_string();
        if message.trim().is_empty() {
            ClassifiedError::unknown()
        } else {
            ClassifiedError::new(ErrorKind::Unknown, message)
        }
    }

    /// Classify an HTTP failure
    pub fn classify_http(&self, error: &HttpError) -> ClassifiedError {
        match error.failure {
            HttpFailure::Decode => {
                log::debug!("Classifying undecodable payload: {}", error.reason);
                return ClassifiedError::new(ErrorKind::Serialization, DEFAULT_MESSAGE);
            }
            HttpFailure::InvalidRequest => return ClassifiedError::unknown(),
            HttpFailure::Network | HttpFailure::Status => {}
        }
        if !self.connectivity.is_online() {
            return ClassifiedError::new(ErrorKind::Offline, OFFLINE_MESSAGE);
        }
        match error.status {
            0 => ClassifiedError::new(ErrorKind::Network, NETWORK_MESSAGE),
            401 => ClassifiedError::new(ErrorKind::SessionExpired, SESSION_EXPIRED_MESSAGE),
            403 => ClassifiedError::new(ErrorKind::PermissionDenied, PERMISSION_DENIED_MESSAGE),
            404 => ClassifiedError::new(ErrorKind::NotFound, NOT_FOUND_MESSAGE),
            status if status >= 500 => ClassifiedError::new(ErrorKind::Server, SERVER_ERROR_MESSAGE),
            status => {
                let fallback = format!("Request failed ({}).", status);
                match server_message(&error.body) {
                    ServerMessage::Found(message) => ClassifiedError::new(ErrorKind::Client, message),
                    ServerMessage::Absent => ClassifiedError::new(ErrorKind::Client, fallback),
                    ServerMessage::Unrenderable => {
                        ClassifiedError::new(ErrorKind::Serialization, fallback)
                    }
                }
            }
        }
    }

    /// Classify an arbitrary value, e.g. a panic payload
    ///
    /// Only error types are inspected; strings, numbers and anything else
    /// resolve to the generic message.
    pub fn classify_any(&self, value: &(dyn Any + Send)) -> ClassifiedError {
        if let Some(http) = value.downcast_ref::<HttpError>() {
            return self.classify_http(http);
        }
        if let Some(error) = value.downcast_ref::<anyhow::Error>() {
            return self.classify(error);
        }
        ClassifiedError::unknown()
    }

    /// Classify an optional error; `None` yields the generic message
    pub fn classify_opt(&self, error: Option<&anyhow::Error>) -> ClassifiedError {
        error
            .map(|e| self.classify(e))
            .unwrap_or_else(ClassifiedError::unknown)
    }
}

enum ServerMessage {
    Found(String),
    Absent,
    Unrenderable,
}

/// Pick the most useful server-supplied message out of an error body
fn server_message(body: &ErrorBody) -> ServerMessage {
    match body {
        ErrorBody::Empty => ServerMessage::Absent,
        ErrorBody::Text(text) if text.is_empty() => ServerMessage::Absent,
        ErrorBody::Text(text) => ServerMessage::Found(text.clone()),
        ErrorBody::Unreadable(_) => ServerMessage::Unrenderable,
        ErrorBody::Json(value) => {
            if let Some(text) = value.as_str() {
                return if text.is_empty() {
                    ServerMessage::Absent
                } else {
                    ServerMessage::Found(text.to_string())
                };
            }
            if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
                return ServerMessage::Found(message.to_string());
            }
            if let Some(first) = value
                .get("errors")
                .and_then(|e| e.as_array())
                .and_then(|errors| errors.first())
                .and_then(|first| first.as_str())
            {
                return ServerMessage::Found(first.to_string());
            }
            match serde_json::to_string(value) {
                Ok(rendered) => ServerMessage::Found(rendered),
                Err(_) => ServerMessage::Unrenderable,
            }
        }
    }
}
