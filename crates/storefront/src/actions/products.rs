//! Products actions

use crate::domain_models::Product;

/// Actions for the product catalogue
#[derive(Debug, Clone, PartialEq)]
pub enum ProductsAction {
    /// Request the product feed (handled by `ProductsEffects`)
    LoadProducts,
    /// Product feed arrived
    LoadProductsSuccess(Vec<Product>),
    /// Product feed failed; carries the user-facing message
    LoadProductsFailure(String),
}

impl ProductsAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            ProductsAction::LoadProducts => "[Products] Load Products",
            ProductsAction::LoadProductsSuccess(_) => "[Products] Load Products Success",
            ProductsAction::LoadProductsFailure(_) => "[Products] Load Products Failure",
        }
    }
}
