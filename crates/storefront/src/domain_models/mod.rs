//! Domain models
//!
//! Core domain types used throughout the application.
//! These are pure domain concepts, separate from store state.

pub mod cart_item;
pub mod product;

pub use cart_item::CartItem;
pub use product::Product;
