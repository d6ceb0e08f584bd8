//! Application wiring
//!
//! Builds the complete object graph: intercepted transport, persistence
//! mirror, store with its middleware chain, facades and error handler.

use crate::error_handler::GlobalErrorHandler;
use crate::facades::{CartFacade, ProductsFacade};
use crate::middleware::{LoggingMiddleware, ProductsEffects};
use crate::persistence::PersistenceMirror;
use crate::reducers::app_reducer;
use crate::services::ProductService;
use crate::state::AppState;
use crate::store::Store;
use anyhow::Result;
use std::sync::Arc;
use storefront_config::{AppConfig, KeyValueStorage};
use storefront_http::{
    Connectivity, ErrorClassifier, ErrorNotifier, InterceptedTransport, LoadingTracker,
    LogNotifier, Transport,
};

/// A fully wired storefront
pub struct Storefront {
    pub store: Store,
    pub cart: CartFacade,
    pub products: ProductsFacade,
    /// Shared in-flight request tracker
    pub loading: LoadingTracker,
    pub error_handler: GlobalErrorHandler,
}

impl Storefront {
    /// Wire the application around a direct transport
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration
    /// * `storage` - Backing storage of the persistence mirror
    /// * `direct` - Transport that performs the actual requests
    /// * `connectivity` - Online/offline source for error classification
    pub fn build<T>(
        config: &AppConfig,
        storage: Arc<dyn KeyValueStorage>,
        direct: T,
        connectivity: Arc<dyn Connectivity>,
    ) -> Result<Self>
    where
        T: Transport + 'static,
    {
        let classifier = ErrorClassifier::new(connectivity);
        let notifier: Arc<dyn ErrorNotifier> = Arc::new(LogNotifier);
        let loading = LoadingTracker::new();
        let transport: Arc<dyn Transport> = Arc::new(InterceptedTransport::new(
            direct,
            loading.clone(),
            classifier.clone(),
            notifier.clone(),
        ));

        let mirror = PersistenceMirror::from_names(&config.persisted_slices, storage);
        log::info!("Mirroring state slices: {:?}", mirror.keys());
        let initial = mirror.rehydrate(AppState::default());

        let mut store = Store::new(initial, mirror.wrap(app_reducer::reduce));
        store.add_middleware(Box::new(LoggingMiddleware::new()));
        store.add_middleware(Box::new(ProductsEffects::new(
            ProductService::new(transport, &config.api_url),
            classifier.clone(),
        )?));

        let cart = CartFacade::new(&store);
        let products = ProductsFacade::new(&store);
        let error_handler = GlobalErrorHandler::new(classifier, notifier, config.production);

        Ok(Self {
            store,
            cart,
            products,
            loading,
            error_handler,
        })
    }
}
