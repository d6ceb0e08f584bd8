use crate::domain_models::Product;
use serde::{Deserialize, Serialize};

/// A product in the cart with its quantity (always ≥ 1 while stored)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    pub fn sku(&self) -> &str {
        &self.product.sku
    }

    /// Price × quantity
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}
