//! Application State Module
//!
//! Contains all state types used by the application, organized by slice.

mod app;
mod cart;
mod products;

pub use app::AppState;
pub use cart::CartState;
pub use products::ProductsState;
