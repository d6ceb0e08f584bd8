//! Actions module
//!
//! Every state transition starts with an `Action`. Actions are grouped by the
//! slice they target, mirroring the layout of `state` and `reducers`.

pub mod cart;
pub mod products;

pub use cart::CartAction;
pub use products::ProductsAction;

/// Root action enum - tagged by state slice
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Cart slice actions
    Cart(CartAction),
    /// Products slice actions
    Products(ProductsAction),

    /// No-op action
    None,
}

impl Action {
    /// Human-readable action type, e.g. `[Cart] Add To Cart`
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Cart(action) => action.type_name(),
            Action::Products(action) => action.type_name(),
            Action::None => "[App] None",
        }
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

impl From<ProductsAction> for Action {
    fn from(action: ProductsAction) -> Self {
        Action::Products(action)
    }
}
