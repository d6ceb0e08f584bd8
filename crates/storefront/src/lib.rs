//! Headless storefront core
//!
//! A Redux-shaped application core for a product catalogue and a shopping
//! cart:
//!
//! ```text
//!  facades ──dispatch──▶ Dispatcher ──▶ Store ──▶ middleware ──▶ reducer
//!     ▲                     ▲                        │              │
//!     │                     └──── ProductsEffects ◀──┘              ▼
//!     └──────────── watch::Receiver<AppState> ◀──── persistence mirror
//! ```

pub mod actions;
pub mod app;
pub mod dispatcher;
pub mod domain_models;
pub mod error_handler;
pub mod facades;
pub mod logger;
pub mod middleware;
pub mod persistence;
pub mod reducers;
pub mod selectors;
pub mod services;
pub mod state;
pub mod store;

pub use app::Storefront;
