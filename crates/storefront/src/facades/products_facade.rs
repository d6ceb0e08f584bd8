use crate::actions::ProductsAction;
use crate::dispatcher::Dispatcher;
use crate::domain_models::Product;
use crate::facades::Selection;
use crate::selectors;
use crate::state::AppState;
use crate::store::Store;
use tokio::sync::watch;

/// Read/write surface for the product catalogue
#[derive(Debug, Clone)]
pub struct ProductsFacade {
    dispatcher: Dispatcher,
    state: watch::Receiver<AppState>,
}

impl ProductsFacade {
    pub fn new(store: &Store) -> Self {
        Self {
            dispatcher: store.dispatcher().clone(),
            state: store.subscribe(),
        }
    }

    /// Products to display (currently the whole catalogue)
    pub fn filtered_products(&self) -> Vec<Product> {
        selectors::all_products(&self.state.borrow())
    }

    pub fn loading(&self) -> bool {
        selectors::products_loading(&self.state.borrow())
    }

    pub fn error(&self) -> Option<String> {
        selectors::products_error(&self.state.borrow())
    }

    pub fn select_filtered_products(&self) -> Selection<Vec<Product>> {
        Selection::new(self.state.clone(), selectors::all_products)
    }

    pub fn select_loading(&self) -> Selection<bool> {
        Selection::new(self.state.clone(), selectors::products_loading)
    }

    pub fn load_products(&self) {
        self.dispatcher.dispatch(ProductsAction::LoadProducts);
    }
}
