//! Transport trait
//!
//! This module defines the core `Transport` trait that every HTTP backend
//! must satisfy. The resource client only ever talks to a `Transport`, so
//! interceptors (loading tracking, error notification) and test doubles
//! compose around it as decorators.

use crate::error::HttpError;
use crate::types::{HttpRequest, HttpResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// HTTP transport trait
///
/// Sends one fully-resolved request and returns the successful response.
/// Any non-2xx status or network failure is reported as `HttpError`.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_http::{HttpMethod, HttpRequest, Transport};
///
/// async fn ping(transport: &dyn Transport) -> Result<u16, storefront_http::HttpError> {
///     let response = transport
///         .send(HttpRequest::new(HttpMethod::Get, "http://localhost/health"))
///         .await?;
///     Ok(response.status)
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request
    ///
    /// # Returns
    ///
    /// The response for 2xx statuses, `HttpError` otherwise.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(request).await
    }
}
