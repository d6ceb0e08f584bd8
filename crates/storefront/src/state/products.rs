//! Products State

use crate::domain_models::Product;
use serde::{Deserialize, Serialize};

/// Product catalogue state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductsState {
    pub products: Vec<Product>,
    /// True between `LoadProducts` and its success/failure; never persisted
    #[serde(skip)]
    pub loading: bool,
    /// User-facing message of the last failed load
    #[serde(default)]
    pub error: Option<String>,
}
