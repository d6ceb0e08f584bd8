use crate::actions::Action;
use crate::reducers::{cart_reducer, products_reducer};
use crate::state::AppState;

/// Reducer - pure function that produces new state from current state + action
/// This is the root reducer that orchestrates all slice reducers
pub fn reduce(state: AppState, action: &Action) -> AppState {
    AppState {
        cart: cart_reducer::reduce(state.cart, action),
        products: products_reducer::reduce(state.products, action),
    }
}
