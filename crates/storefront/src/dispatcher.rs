//! Dispatcher for queued action dispatch
//!
//! Middleware, facades and background tasks never touch the store directly.
//! They hand actions to a `Dispatcher`, and the store applies them in arrival
//! order the next time it drains its queue.
//!
//! This enables patterns like:
//! - `ProductsEffects` dispatching `LoadProductsSuccess` from a tokio task
//! - `CartFacade::add_to_cart` queuing an action from any thread

use crate::actions::Action;
use std::sync::mpsc::Sender;

/// Dispatcher for sending actions to the store's queue
///
/// Queued actions go through the full middleware chain, so middleware can
/// trigger other middleware handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    action_tx: Sender<Action>,
}

impl Dispatcher {
    /// Create a new dispatcher feeding the store's action channel
    pub fn new(action_tx: Sender<Action>) -> Self {
        Self { action_tx }
    }

    /// Queue an action for processing
    pub fn dispatch(&self, action: impl Into<Action>) {
        if let Err(e) = self.action_tx.send(action.into()) {
            log::error!("Dispatcher: failed to send action: {}", e);
        }
    }
}
