//! Cart State

use crate::domain_models::CartItem;
use serde::{Deserialize, Serialize};

/// Cart state
///
/// `total_items` and `total_price` are derived from `items` and are
/// recomputed on every transition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    /// Items in insertion order, unique by sku
    pub items: Vec<CartItem>,
    /// Sum of quantities, wide enough that it can never overflow
    pub total_items: u64,
    pub total_price: f64,
}

impl CartState {
    /// Build a state from items, computing both totals
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let total_items = items.iter().map(|item| u64::from(item.quantity)).sum();
        let total_price = items.iter().map(CartItem::line_total).sum();
        Self {
            items,
            total_items,
            total_price,
        }
    }

    /// Rebuild a state from untrusted items (e.g. read back from storage)
    ///
    /// Empty lines are dropped and repeated skus are merged into the first
    /// line; stored totals are never trusted.
    pub fn sanitized(items: Vec<CartItem>) -> Self {
        let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
        for item in items.into_iter().filter(|item| item.quantity > 0) {
            match merged.iter_mut().find(|line| line.sku() == item.sku()) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => merged.push(item),
            }
        }
        Self::from_items(merged)
    }

    pub fn item(&self, sku: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.sku() == sku)
    }
}
