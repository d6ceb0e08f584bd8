//! Product model
//!
//! Domain model for catalogue entries as served by the product feed.

use serde::{Deserialize, Serialize};

/// A catalogue product, immutable once fetched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Stock keeping unit, unique per product
    pub sku: String,
    pub name: String,
    /// Selling price
    pub price: f64,
    /// Recommended retail (reference) price
    pub rrp: f64,
    /// Image URL or asset path
    pub image: String,
}

impl Product {
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        rrp: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            price,
            rrp,
            image: image.into(),
        }
    }

    /// Amount saved against the reference price (never negative)
    pub fn savings(&self) -> f64 {
        (self.rrp - self.price).max(0.0)
    }
}
