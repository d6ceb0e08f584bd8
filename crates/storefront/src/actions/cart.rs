//! Cart actions

use crate::domain_models::Product;

/// Actions for the shopping cart
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one unit of a product (appends it when not yet in the cart)
    AddToCart(Product),
    /// Drop the item with this sku
    RemoveFromCart(String),
    /// Set the quantity of an item; zero or less removes it
    UpdateQuantity { sku: String, quantity: i64 },
    /// Empty the cart
    ClearCart,
}

impl CartAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            CartAction::AddToCart(_) => "[Cart] Add To Cart",
            CartAction::RemoveFromCart(_) => "[Cart] Remove From Cart",
            CartAction::UpdateQuantity { .. } => "[Cart] Update Quantity",
            CartAction::ClearCart => "[Cart] Clear Cart",
        }
    }
}
