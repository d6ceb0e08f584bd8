//! State persistence mirror
//!
//! Keeps selected state slices mirrored in local storage, one JSON entry per
//! slice key:
//!
//! - `rehydrate` reads the entries once at startup and overlays them on the
//!   initial state.
//! - `wrap` turns a reducer into one that writes every changed slice back
//!   after each transition.
//!
//! Storage trouble is never fatal: unreadable entries fall back to the
//! initial slice and failed writes are logged and dropped.

use crate::actions::Action;
use crate::state::{AppState, CartState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use storefront_config::KeyValueStorage;

/// A state slice that can be mirrored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceKey {
    Cart,
    Products,
}

impl SliceKey {
    /// Storage key of the slice
    pub fn as_str(&self) -> &'static str {
        match self {
            SliceKey::Cart => "cart",
            SliceKey::Products => "products",
        }
    }

    /// Whether the slice differs between two snapshots
    fn changed(&self, before: &AppState, after: &AppState) -> bool {
        match self {
            SliceKey::Cart => !Arc::ptr_eq(&before.cart, &after.cart),
            SliceKey::Products => !Arc::ptr_eq(&before.products, &after.products),
        }
    }
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SliceKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart" => Ok(SliceKey::Cart),
            "products" => Ok(SliceKey::Products),
            other => Err(format!("unknown state slice {:?}", other)),
        }
    }
}

/// Mirrors state slices to a `KeyValueStorage`
#[derive(Clone)]
pub struct PersistenceMirror {
    keys: Vec<SliceKey>,
    storage: Arc<dyn KeyValueStorage>,
}

impl fmt::Debug for PersistenceMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceMirror")
            .field("keys", &self.keys)
            .finish()
    }
}

impl PersistenceMirror {
    pub fn new(keys: Vec<SliceKey>, storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut unique = Vec::with_capacity(keys.len());
        for key in keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }
        Self {
            keys: unique,
            storage,
        }
    }

    /// Build from configured slice names; unknown names are skipped
    pub fn from_names(names: &[String], storage: Arc<dyn KeyValueStorage>) -> Self {
        let keys = names
            .iter()
            .filter_map(|name| match name.parse::<SliceKey>() {
                Ok(key) => Some(key),
                Err(e) => {
                    log::warn!("Persistence: ignoring {}", e);
                    None
                }
            })
            .collect();
        Self::new(keys, storage)
    }

    pub fn keys(&self) -> &[SliceKey] {
        &self.keys
    }

    /// Overlay stored slices on `initial`
    pub fn rehydrate(&self, initial: AppState) -> AppState {
        let mut state = initial;
        for key in &self.keys {
            match key {
                SliceKey::Cart => {
                    if let Some(stored) = self.read::<CartState>(*key) {
                        let cart = CartState::sanitized(stored.items.clone());
                        if cart != stored {
                            log::warn!("Persistence: stored cart was inconsistent, totals recomputed");
                        }
                        state.cart = Arc::new(cart);
                    }
                }
                SliceKey::Products => {
                    if let Some(products) = self.read(*key) {
                        state.products = Arc::new(products);
                    }
                }
            }
        }
        state
    }

    /// Wrap a reducer so that every changed mirrored slice is written back
    pub fn wrap<R>(self, reducer: R) -> impl Fn(AppState, &Action) -> AppState + Send + 'static
    where
        R: Fn(AppState, &Action) -> AppState + Send + 'static,
    {
        move |state: AppState, action: &Action| {
            let before = state.clone();
            let after = reducer(state, action);
            for key in &self.keys {
                if key.changed(&before, &after) {
                    self.write(*key, &after);
                }
            }
            after
        }
    }

    fn read<T: DeserializeOwned>(&self, key: SliceKey) -> Option<T> {
        let raw = match self.storage.get(key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Persistence: failed to read {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => {
                log::info!("Persistence: rehydrated {}", key);
                Some(value)
            }
            Err(e) => {
                log::warn!("Persistence: discarding corrupted {} entry: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: SliceKey, state: &AppState) {
        let json = match key {
            SliceKey::Cart => to_json(&*state.cart),
            SliceKey::Products => to_json(&*state.products),
        };
        let result = json.and_then(|json| {
            self.storage
                .set(key.as_str(), &json)
                .map_err(anyhow::Error::from)
        });
        if let Err(e) = result {
            log::warn!("Persistence: failed to write {}: {}", key, e);
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{CartAction, ProductsAction};
    use crate::domain_models::{CartItem, Product};
    use crate::reducers::app_reducer;
    use crate::state::ProductsState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storefront_config::{MemoryStorage, StorageError};

    fn shoe() -> Product {
        Product::new("sku-1", "Red Shoe", 1999.0, 2299.0, "red.png")
    }

    /// Counts writes, delegating to memory
    #[derive(Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        writes: AtomicUsize,
    }

    impl KeyValueStorage for CountingStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    /// Every operation fails
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn test_slice_key_parsing() {
        assert_eq!("cart".parse::<SliceKey>(), Ok(SliceKey::Cart));
        assert_eq!("products".parse::<SliceKey>(), Ok(SliceKey::Products));
        assert!("auth".parse::<SliceKey>().is_err());

        let mirror = PersistenceMirror::from_names(
            &["cart".to_string(), "auth".to_string(), "cart".to_string()],
            Arc::new(MemoryStorage::new()),
        );
        assert_eq!(mirror.keys(), &[SliceKey::Cart]);
    }

    #[test]
    fn test_wrap_writes_changed_slices_and_rehydrate_restores_them() {
        let storage = Arc::new(MemoryStorage::new());
        let mirror = PersistenceMirror::new(vec![SliceKey::Cart], storage.clone());
        let reducer = mirror.clone().wrap(app_reducer::reduce);

        let state = reducer(
            AppState::default(),
            &Action::Cart(CartAction::AddToCart(shoe())),
        );
        let stored = storage.get("cart").unwrap().unwrap();
        assert_eq!(stored, serde_json::to_string(&*state.cart).unwrap());

        let restored = mirror.rehydrate(AppState::default());
        assert_eq!(*restored.cart, *state.cart);
        // Re-serialising the restored slice gives the same bytes
        assert_eq!(serde_json::to_string(&*restored.cart).unwrap(), stored);
    }

    #[test]
    fn test_unmirrored_and_unchanged_slices_are_not_written() {
        let storage = Arc::new(CountingStorage::default());
        let mirror = PersistenceMirror::new(vec![SliceKey::Cart], storage.clone());
        let reducer = mirror.wrap(app_reducer::reduce);

        let state = reducer(AppState::default(), &Action::Products(ProductsAction::LoadProducts));
        assert_eq!(storage.writes.load(Ordering::SeqCst), 0);

        let state = reducer(state, &Action::Cart(CartAction::AddToCart(shoe())));
        assert_eq!(storage.writes.load(Ordering::SeqCst), 1);

        let _ = reducer(state, &Action::Cart(CartAction::RemoveFromCart("nope".to_string())));
        assert_eq!(storage.writes.load(Ordering::SeqCst), 1);
        assert!(storage.get("products").unwrap().is_none());
    }

    #[test]
    fn test_corrupted_entry_falls_back_to_initial() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("cart", "{not json").unwrap();
        storage.set("products", r#"{"products": 12}"#).unwrap();
        let mirror = PersistenceMirror::new(vec![SliceKey::Cart, SliceKey::Products], storage);

        let initial = AppState::default();
        let state = mirror.rehydrate(initial.clone());
        assert!(state.same_as(&initial));
    }

    #[test]
    fn test_rehydrated_cart_totals_come_from_items() {
        let storage = Arc::new(MemoryStorage::new());
        let item = serde_json::to_value(CartItem::new(shoe(), 1)).unwrap();
        let empty = serde_json::to_value(CartItem::new(shoe(), 0)).unwrap();
        let stored = serde_json::json!({
            "items": [item, empty, item],
            "total_items": 7,
            "total_price": 5.0
        });
        storage.set("cart", &stored.to_string()).unwrap();
        let mirror = PersistenceMirror::new(vec![SliceKey::Cart], storage);

        let state = mirror.rehydrate(AppState::default());
        assert_eq!(state.cart.items, vec![CartItem::new(shoe(), 2)]);
        assert_eq!(state.cart.total_items, 2);
        assert_eq!(state.cart.total_price, 3998.0);
    }

    #[test]
    fn test_rehydrated_products_are_not_loading() {
        let storage = Arc::new(MemoryStorage::new());
        let products = ProductsState {
            products: vec![shoe()],
            loading: true,
            error: None,
        };
        storage
            .set("products", &serde_json::to_string(&products).unwrap())
            .unwrap();
        let mirror = PersistenceMirror::new(vec![SliceKey::Products], storage);

        let state = mirror.rehydrate(AppState::default());
        assert_eq!(state.products.products, vec![shoe()]);
        assert!(!state.products.loading);
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mirror = PersistenceMirror::new(vec![SliceKey::Cart], Arc::new(BrokenStorage));
        let state = mirror.rehydrate(AppState::default());
        assert_eq!(*state.cart, CartState::default());

        let reducer = mirror.wrap(app_reducer::reduce);
        let state = reducer(state, &Action::Cart(CartAction::AddToCart(shoe())));
        assert_eq!(state.cart.total_items, 1);
    }
}
