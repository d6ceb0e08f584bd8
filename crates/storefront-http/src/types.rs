//! HTTP request/response value types
//!
//! These types are what travels through the `Transport` chain. Decorators
//! and mocks inspect and rewrite them without touching a reqwest client.

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header that suppresses the global error notification for one call
pub const SKIP_ERROR_NOTIFY_HEADER: &str = "x-skip-error-notify";

/// Header that suppresses loading-tracker start/stop for one call
pub const SKIP_LOADING_HEADER: &str = "x-skip-loading";

/// HTTP methods used by the resource client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// An outbound request, fully resolved (URL built, headers merged, query normalized)
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Normalized query pairs, in order
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    /// JSON body (None for GET/DELETE)
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Check whether a header is present, whatever its value
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Remove a control header, returning whether it was set
    ///
    /// Only a non-empty value sets the flag; the header is removed either way.
    pub fn take_flag(&mut self, name: &str) -> bool {
        self.headers
            .remove(name)
            .is_some_and(|value| !value.as_bytes().is_empty())
    }
}

/// A successful (2xx) response
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Build a 200 response carrying the JSON encoding of `value`
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(200, serde_json::to_vec(value)?))
    }
}
