use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::state::AppState;

pub mod logging;
pub mod products_effects;

pub use logging::LoggingMiddleware;
pub use products_effects::ProductsEffects;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware runs synchronously inside `Store::dispatch`; anything slow
/// (HTTP, disk) must be handed off to a runtime and report back through the
/// dispatcher.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current application state (read-only snapshot)
    /// - `dispatcher`: Use to queue follow-up actions
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool;
}
