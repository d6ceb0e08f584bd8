//! Selectors
//!
//! Pure projections over `AppState`. Facades wrap these in `Selection`s;
//! anything else holding a snapshot can call them directly.

use crate::domain_models::{CartItem, Product};
use crate::state::AppState;

pub fn cart_items(state: &AppState) -> Vec<CartItem> {
    state.cart.items.clone()
}

pub fn cart_total_items(state: &AppState) -> u64 {
    state.cart.total_items
}

pub fn cart_total_price(state: &AppState) -> f64 {
    state.cart.total_price
}

/// Cart item for a product sku, if it is in the cart
pub fn cart_item_by_sku(state: &AppState, sku: &str) -> Option<CartItem> {
    state.cart.item(sku).cloned()
}

pub fn all_products(state: &AppState) -> Vec<Product> {
    state.products.products.clone()
}

pub fn products_loading(state: &AppState) -> bool {
    state.products.loading
}

pub fn products_error(state: &AppState) -> Option<String> {
    state.products.error.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CartState, ProductsState};
    use std::sync::Arc;

    fn state() -> AppState {
        let shoe = Product::new("sku-1", "Red Shoe", 1999.0, 2299.0, "red.png");
        AppState {
            cart: Arc::new(CartState::from_items(vec![CartItem::new(shoe.clone(), 2)])),
            products: Arc::new(ProductsState {
                products: vec![shoe],
                loading: true,
                error: Some("Network error. Please try again.".to_string()),
            }),
        }
    }

    #[test]
    fn test_cart_selectors() {
        let state = state();
        assert_eq!(cart_items(&state).len(), 1);
        assert_eq!(cart_total_items(&state), 2);
        assert_eq!(cart_total_price(&state), 3998.0);
        assert_eq!(cart_item_by_sku(&state, "sku-1").map(|i| i.quantity), Some(2));
        assert_eq!(cart_item_by_sku(&state, "sku-9"), None);
    }

    #[test]
    fn test_products_selectors() {
        let state = state();
        assert_eq!(all_products(&state)[0].sku, "sku-1");
        assert!(products_loading(&state));
        assert_eq!(
            products_error(&state).as_deref(),
            Some("Network error. Please try again.")
        );
    }
}
