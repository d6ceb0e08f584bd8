use crate::actions::CartAction;
use crate::dispatcher::Dispatcher;
use crate::domain_models::{CartItem, Product};
use crate::facades::Selection;
use crate::selectors;
use crate::state::AppState;
use crate::store::Store;
use tokio::sync::watch;

/// Read/write surface for the cart
#[derive(Debug, Clone)]
pub struct CartFacade {
    dispatcher: Dispatcher,
    state: watch::Receiver<AppState>,
}

impl CartFacade {
    pub fn new(store: &Store) -> Self {
        Self {
            dispatcher: store.dispatcher().clone(),
            state: store.subscribe(),
        }
    }

    pub fn items(&self) -> Vec<CartItem> {
        selectors::cart_items(&self.state.borrow())
    }

    pub fn total_items(&self) -> u64 {
        selectors::cart_total_items(&self.state.borrow())
    }

    pub fn total_price(&self) -> f64 {
        selectors::cart_total_price(&self.state.borrow())
    }

    pub fn item(&self, sku: &str) -> Option<CartItem> {
        selectors::cart_item_by_sku(&self.state.borrow(), sku)
    }

    pub fn select_items(&self) -> Selection<Vec<CartItem>> {
        Selection::new(self.state.clone(), selectors::cart_items)
    }

    pub fn select_total_items(&self) -> Selection<u64> {
        Selection::new(self.state.clone(), selectors::cart_total_items)
    }

    pub fn select_total_price(&self) -> Selection<f64> {
        Selection::new(self.state.clone(), selectors::cart_total_price)
    }

    pub fn select_item(&self, sku: impl Into<String>) -> Selection<Option<CartItem>> {
        let sku = sku.into();
        Selection::new(self.state.clone(), move |state| {
            selectors::cart_item_by_sku(state, &sku)
        })
    }

    pub fn add_to_cart(&self, product: Product) {
        self.dispatcher.dispatch(CartAction::AddToCart(product));
    }

    pub fn remove_from_cart(&self, sku: impl Into<String>) {
        self.dispatcher.dispatch(CartAction::RemoveFromCart(sku.into()));
    }

    /// Set an item's quantity; zero or less removes the item
    pub fn update_quantity(&self, sku: impl Into<String>, quantity: i64) {
        self.dispatcher.dispatch(CartAction::UpdateQuantity {
            sku: sku.into(),
            quantity,
        });
    }

    pub fn clear_cart(&self) {
        self.dispatcher.dispatch(CartAction::ClearCart);
    }
}
