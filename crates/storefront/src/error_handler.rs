//! Global error handler
//!
//! Last line of defense for errors nobody handled and for panics. HTTP
//! failures were already surfaced by the intercepting transport, so they are
//! only logged here; everything else is classified and notified.

use std::any::Any;
use std::panic::PanicHookInfo;
use std::sync::Arc;
use storefront_http::{ErrorClassifier, ErrorNotifier, HttpError};

/// Handles uncaught errors and panics
#[derive(Clone)]
pub struct GlobalErrorHandler {
    classifier: ErrorClassifier,
    notifier: Arc<dyn ErrorNotifier>,
    production: bool,
}

impl std::fmt::Debug for GlobalErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalErrorHandler")
            .field("production", &self.production)
            .finish()
    }
}

impl GlobalErrorHandler {
    pub fn new(
        classifier: ErrorClassifier,
        notifier: Arc<dyn ErrorNotifier>,
        production: bool,
    ) -> Self {
        Self {
            classifier,
            notifier,
            production,
        }
    }

    /// Handle an error that reached the top of the application
    pub fn handle_error(&self, error: &anyhow::Error) {
        if let Some(http) = error.downcast_ref::<HttpError>() {
            // Already notified by the transport
            if !self.production {
                log::warn!("[HTTP caught in error handler] {}", http);
            }
            return;
        }

        self.notifier.notify(&self.classifier.classify(error));
        if !self.production {
            log::error!("[Uncaught error] {:#}", error);
        }
    }

    /// Handle a panic payload
    pub fn handle_panic(&self, payload: &(dyn Any + Send)) {
        self.notifier.notify(&self.classifier.classify_any(payload));
        if !self.production {
            log::error!("[Uncaught panic] {}", panic_message(payload));
        }
    }

    /// Route panics through `handle_panic`, then the previous hook
    pub fn install_panic_hook(self) {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
            self.handle_panic(info.payload());
            if let Some(location) = info.location() {
                log::error!("Panic at {}:{}", location.file(), location.line());
            }
            previous(info);
        }));
    }
}

/// Best-effort text of a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
