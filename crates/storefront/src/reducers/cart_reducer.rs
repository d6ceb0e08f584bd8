//! Cart Reducer
//!
//! Totals are never patched incrementally: every transition rebuilds the
//! state through `CartState::from_items`.

use crate::actions::{Action, CartAction};
use crate::domain_models::CartItem;
use crate::state::CartState;
use std::sync::Arc;

/// Reduce cart actions; any other action returns `state` untouched
pub fn reduce(state: Arc<CartState>, action: &Action) -> Arc<CartState> {
    let Action::Cart(action) = action else {
        return state;
    };

    match action {
        CartAction::AddToCart(product) => {
            let mut items = state.items.clone();
            match items.iter_mut().find(|item| item.sku() == product.sku) {
                Some(item) => item.quantity = item.quantity.saturating_add(1),
                None => items.push(CartItem::new(product.clone(), 1)),
            }
            Arc::new(CartState::from_items(items))
        }

        CartAction::RemoveFromCart(sku) => {
            if state.item(sku).is_none() {
                log::debug!("Cart: remove of unknown sku {}", sku);
                return state;
            }
            let items = state
                .items
                .iter()
                .filter(|item| item.sku() != sku)
                .cloned()
                .collect();
            Arc::new(CartState::from_items(items))
        }

        CartAction::UpdateQuantity { sku, quantity } => {
            if state.item(sku).is_none() {
                log::debug!("Cart: quantity update for unknown sku {}", sku);
                return state;
            }
            let items = state
                .items
                .iter()
                .filter_map(|item| {
                    if item.sku() != sku {
                        return Some(item.clone());
                    }
                    if *quantity <= 0 {
                        return None;
                    }
                    let quantity = u32::try_from(*quantity).unwrap_or(u32::MAX);
                    Some(CartItem::new(item.product.clone(), quantity))
                })
                .collect();
            Arc::new(CartState::from_items(items))
        }

        CartAction::ClearCart => Arc::new(CartState::default()),
    }
}
