//! Resource-oriented HTTP client with loading tracking and error classification
//!
//! This crate provides a trait-based HTTP transport, a generic REST resource
//! client on top of it, and an intercepting decorator that adds request
//! lifecycle tracking and user-facing error notification.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 ResourceClient                   │
//! │  - list() / get_by_id()                          │
//! │  - create() / update() / patch() / delete()      │
//! │  - request()                                     │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌─────────────────────────────────────────────────┐
//! │                 Transport trait                  │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ ReqwestTransport│         │ InterceptedTransport│
//! │ (direct)        │◄────────│ (decorator)         │
//! └─────────────────┘         └─────────────────────┘
//!                                  │           │
//!                                  ▼           ▼
//!                        LoadingTracker   ErrorClassifier
//!                                          + ErrorNotifier
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_http::{
//!     ErrorClassifier, InterceptedTransport, LoadingTracker, LogNotifier, RequestOptions,
//!     ReqwestTransport, ResourceClient,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), storefront_http::HttpError> {
//! let direct = ReqwestTransport::new();
//! let classifier = ErrorClassifier::new(Arc::new(direct.connectivity().clone()));
//! let loading = LoadingTracker::new();
//! let transport = InterceptedTransport::new(direct, loading.clone(), classifier, Arc::new(LogNotifier));
//!
//! let products = ResourceClient::new(Arc::new(transport), "http://localhost:8080", "products.json");
//! let all: Vec<serde_json::Value> = products.list(RequestOptions::new()).await?;
//! assert!(!loading.is_loading());
//! # let _ = all;
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod error;
pub mod intercept;
pub mod loading;
pub mod reqwest_transport;
pub mod resource;
pub mod transport;
pub mod types;

pub use classify::{ClassifiedError, Connectivity, ConnectivityFlag, ErrorClassifier, ErrorKind};
pub use error::{ErrorBody, HttpError, HttpFailure};
pub use intercept::{ErrorNotifier, InterceptedTransport, LogNotifier};
pub use loading::{LoadingGuard, LoadingTracker, LoadingWatch};
pub use reqwest_transport::ReqwestTransport;
pub use resource::{QueryParams, QueryValue, RequestOptions, ResourceClient, Segment};
pub use transport::Transport;
pub use types::{
    HttpMethod, HttpRequest, HttpResponse, SKIP_ERROR_NOTIFY_HEADER, SKIP_LOADING_HEADER,
};

// Re-export reqwest header types so consumers can build headers without a direct dependency
pub use reqwest::header;
