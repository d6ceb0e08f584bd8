//! Products Effects Middleware
//!
//! Performs the product feed request for `LoadProducts`:
//! - The request runs on the middleware's own tokio runtime
//! - Success dispatches `LoadProductsSuccess`
//! - Failure dispatches `LoadProductsFailure` with the classified message
//!
//! Only the latest load may report back. A newer `LoadProducts` aborts the
//! older task, and results the older task already queued are consumed here
//! before they reach the reducer.

use crate::actions::{Action, ProductsAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::services::ProductService;
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use storefront_http::{ErrorClassifier, RequestOptions};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

/// Bookkeeping shared between the middleware and its load tasks
#[derive(Debug, Default)]
struct LoadTicket {
    /// Incremented by every `LoadProducts`
    generation: u64,
    /// Results of the current generation dispatched but not yet seen
    undelivered: usize,
    /// Queued results of superseded generations, still to be dropped
    stale: usize,
}

fn lock(ticket: &Mutex<LoadTicket>) -> MutexGuard<'_, LoadTicket> {
    ticket.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Middleware for product feed side effects
pub struct ProductsEffects {
    /// Tokio runtime for async operations
    runtime: Runtime,
    service: ProductService,
    classifier: ErrorClassifier,
    ticket: Arc<Mutex<LoadTicket>>,
    in_flight: Option<JoinHandle<()>>,
}

impl ProductsEffects {
    pub fn new(service: ProductService, classifier: ErrorClassifier) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        Ok(Self {
            runtime,
            service,
            classifier,
            ticket: Arc::new(Mutex::new(LoadTicket::default())),
            in_flight: None,
        })
    }

    fn load_products(&mut self, dispatcher: &Dispatcher) {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                log::debug!("ProductsEffects: superseding in-flight product load");
                previous.abort();
            }
        }

        let generation = {
            let mut ticket = lock(&self.ticket);
            ticket.stale += ticket.undelivered;
            ticket.undelivered = 0;
            ticket.generation += 1;
            ticket.generation
        };

        let service = self.service.clone();
        let classifier = self.classifier.clone();
        let ticket = self.ticket.clone();
        let dispatcher = dispatcher.clone();

        log::info!("ProductsEffects: loading product feed");
        let handle = self.runtime.spawn(async move {
            let action = match service.get_products(RequestOptions::new()).await {
                Ok(products) => {
                    log::info!("ProductsEffects: loaded {} products", products.len());
                    ProductsAction::LoadProductsSuccess(products)
                }
                Err(e) => {
                    // The transport already raised the user notification
                    let classified = classifier.classify_http(&e);
                    log::warn!("ProductsEffects: product load failed: {}", e);
                    ProductsAction::LoadProductsFailure(classified.message)
                }
            };

            let mut ticket = lock(&ticket);
            if ticket.generation != generation {
                log::debug!("ProductsEffects: dropping result of superseded load");
                return;
            }
            ticket.undelivered += 1;
            dispatcher.dispatch(action);
        });
        self.in_flight = Some(handle);
    }

    /// Whether a load result belongs to a superseded load
    fn take_stale_result(&self) -> bool {
        let mut ticket = lock(&self.ticket);
        if ticket.stale > 0 {
            ticket.stale -= 1;
            true
        } else {
            ticket.undelivered = ticket.undelivered.saturating_sub(1);
            false
        }
    }
}

impl Middleware for ProductsEffects {
    fn handle(&mut self, action: &Action, _state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Products(ProductsAction::LoadProducts) => {
                self.load_products(dispatcher);
                true
            }
            Action::Products(
                ProductsAction::LoadProductsSuccess(_) | ProductsAction::LoadProductsFailure(_),
            ) => {
                if self.take_stale_result() {
                    log::debug!("ProductsEffects: consumed {}", action.type_name());
                    return false;
                }
                true
            }
            _ => true,
        }
    }
}
