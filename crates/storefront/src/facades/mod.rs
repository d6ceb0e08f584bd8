//! Facades
//!
//! Typed read/write surfaces over the store. Reads come from the store's
//! published snapshots; writes only dispatch actions. No business logic
//! lives here.

pub mod cart_facade;
pub mod products_facade;
mod selection;

pub use cart_facade::CartFacade;
pub use products_facade::ProductsFacade;
pub use selection::Selection;
