//! Application State

use super::{CartState, ProductsState};
use std::sync::Arc;

/// Application state
///
/// Immutable snapshot of every slice. Slices sit behind `Arc`, so a
/// transition that leaves a slice alone shares it with the previous
/// snapshot instead of copying it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub cart: Arc<CartState>,
    pub products: Arc<ProductsState>,
}

impl AppState {
    /// True when both snapshots share every slice
    pub fn same_as(&self, other: &AppState) -> bool {
        Arc::ptr_eq(&self.cart, &other.cart) && Arc::ptr_eq(&self.products, &other.products)
    }
}
