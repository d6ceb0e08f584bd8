use crate::actions::{Action, ProductsAction};
use crate::state::ProductsState;
use std::sync::Arc;

/// Reduce product catalogue actions
///
/// Fetching lives in `ProductsEffects`; this only records the lifecycle.
pub fn reduce(state: Arc<ProductsState>, action: &Action) -> Arc<ProductsState> {
    let Action::Products(action) = action else {
        return state;
    };

    match action {
        ProductsAction::LoadProducts => Arc::new(ProductsState {
            products: state.products.clone(),
            loading: true,
            error: None,
        }),
        ProductsAction::LoadProductsSuccess(products) => Arc::new(ProductsState {
            products: products.clone(),
            loading: false,
            error: None,
        }),
        ProductsAction::LoadProductsFailure(message) => Arc::new(ProductsState {
            products: state.products.clone(),
            loading: false,
            error: Some(message.clone()),
        }),
    }
}
