//! Reducers
//!
//! Pure `(state, action) -> state` functions, one per slice, composed by
//! `app_reducer`. A reducer that does not handle an action hands back the
//! very same `Arc` it was given.

pub mod app_reducer;
pub mod cart_reducer;
pub mod products_reducer;
