//! Store - holds application state and manages the Redux loop
//!
//! `dispatch` runs an action through the middleware chain and the reducer,
//! publishes the resulting snapshot on a `watch` channel, then drains the
//! actions queued through the `Dispatcher` meanwhile. Everything happens on
//! the caller's thread, in strict arrival order.

use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Root reducer signature
pub type Reducer = Box<dyn Fn(AppState, &Action) -> AppState + Send>;

/// Store - holds application state and manages the Redux loop
pub struct Store {
    state: AppState,
    reducer: Reducer,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    action_rx: Receiver<Action>,
    state_tx: watch::Sender<AppState>,
}

impl Store {
    pub fn new<R>(initial_state: AppState, reducer: R) -> Self
    where
        R: Fn(AppState, &Action) -> AppState + Send + 'static,
    {
        let (action_tx, action_rx) = mpsc::channel();
        let (state_tx, _) = watch::channel(initial_state.clone());
        Self {
            state: initial_state,
            reducer: Box::new(reducer),
            middleware: Vec::new(),
            dispatcher: Dispatcher::new(action_tx),
            action_rx,
            state_tx,
        }
    }

    /// Add middleware to the store (runs in insertion order)
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Get the current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get the dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Subscribe to state snapshots
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state_tx.subscribe()
    }

    /// Process an action, then everything queued while processing it
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        self.apply(action.into());
        self.process_pending();
    }

    /// Apply queued actions without blocking; returns how many ran
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.apply(action);
            processed += 1;
        }
        processed
    }

    /// Apply queued actions as they arrive until `predicate` holds
    ///
    /// Used to drive asynchronous effects to completion. Returns whether the
    /// predicate held before `timeout` elapsed.
    pub fn run_until<P>(&mut self, predicate: P, timeout: Duration) -> bool
    where
        P: Fn(&AppState) -> bool,
    {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_pending();
            if predicate(&self.state) {
                return true;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }

            match self.action_rx.recv_timeout(remaining) {
                Ok(action) => self.apply(action),
                Err(RecvTimeoutError::Timeout) => return predicate(&self.state),
                Err(RecvTimeoutError::Disconnected) => {
                    log::error!("Store: action channel disconnected");
                    return predicate(&self.state);
                }
            }
        }
    }

    fn apply(&mut self, action: Action) {
        // Pass through middleware chain; any middleware may consume the action
        for middleware in &mut self.middleware {
            if !middleware.handle(&action, &self.state, &self.dispatcher) {
                return;
            }
        }

        let next = (self.reducer)(self.state.clone(), &action);
        if !next.same_as(&self.state) {
            self.state = next;
            self.state_tx.send_replace(self.state.clone());
        }
    }
}
