//! Intercepting transport (decorator pattern)
//!
//! Wraps any `Transport` to add the two cross-cutting request concerns:
//! loading tracking and global error notification. Both can be switched off
//! per call with a control header; control headers never reach the wire.

use crate::classify::{ClassifiedError, ErrorClassifier};
use crate::error::HttpError;
use crate::loading::LoadingTracker;
use crate::transport::Transport;
use crate::types::{HttpRequest, HttpResponse, SKIP_ERROR_NOTIFY_HEADER, SKIP_LOADING_HEADER};
use async_trait::async_trait;
use log::{debug, error};
use std::fmt;
use std::sync::Arc;

/// Receives user-facing error notifications
pub trait ErrorNotifier: Send + Sync {
    fn notify(&self, error: &ClassifiedError);
}

/// Notifier that surfaces messages through the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl ErrorNotifier for LogNotifier {
    fn notify(&self, error: &ClassifiedError) {
        error!("[Toast] {}", error.message);
    }
}

/// Transport decorator for loading tracking and error notification
///
/// # Behaviour
///
/// Control headers count only with a non-empty value.
///
/// - Loading: unless the request carries `X-Skip-Loading`, the tracker is
///   started before the call and stopped exactly once afterwards, including
///   when the request future is dropped before it completes.
/// - Errors: unless the request carries `X-Skip-Error-Notify`, failures are
///   classified and handed to the `ErrorNotifier`. The error is returned to
///   the caller either way.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_http::{
///     ErrorClassifier, InterceptedTransport, LoadingTracker, LogNotifier, ReqwestTransport,
/// };
/// use std::sync::Arc;
///
/// let direct = ReqwestTransport::new();
/// let classifier = ErrorClassifier::new(Arc::new(direct.connectivity().clone()));
/// let transport = InterceptedTransport::new(
///     direct,
///     LoadingTracker::new(),
///     classifier,
///     Arc::new(LogNotifier),
/// );
/// ```
#[derive(Clone)]
pub struct InterceptedTransport<T: Transport> {
    inner: T,
    loading: LoadingTracker,
    classifier: ErrorClassifier,
    notifier: Arc<dyn ErrorNotifier>,
}

impl<T: Transport + fmt::Debug> fmt::Debug for InterceptedTransport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptedTransport")
            .field("inner", &self.inner)
            .field("loading", &self.loading)
            .finish()
    }
}

impl<T: Transport> InterceptedTransport<T> {
    /// Create a new intercepting transport
    ///
    /// # Arguments
    ///
    /// * `inner` - The transport that actually sends requests
    /// * `loading` - Shared tracker for in-flight requests
    /// * `classifier` - Turns failures into user-facing messages
    /// * `notifier` - Receives the classified failures
    pub fn new(
        inner: T,
        loading: LoadingTracker,
        classifier: ErrorClassifier,
        notifier: Arc<dyn ErrorNotifier>,
    ) -> Self {
        Self {
            inner,
            loading,
            classifier,
            notifier,
        }
    }

    pub fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for InterceptedTransport<T> {
    async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let skip_loading = request.take_flag(SKIP_LOADING_HEADER);
        let skip_notify = request.take_flag(SKIP_ERROR_NOTIFY_HEADER);

        let _guard = (!skip_loading).then(|| self.loading.begin());
        let result = self.inner.send(request).await;

        if let Err(e) = &result {
            if skip_notify {
                debug!("Error notification skipped: {}", e);
            } else {
                self.notifier.notify(&self.classifier.classify_http(e));
            }
        }
        result
    }
}
