use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use storefront::Storefront;
use storefront_config::{AppConfig, FileStorage};
use storefront_http::ReqwestTransport;

/// How long to wait for the product feed before giving up
const FEED_TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> Result<()> {
    // RUST_LOG may come from .env
    let env_file = storefront_config::load_env_file();
    let log_file = storefront::logger::init()?;

    log::info!("Starting storefront");
    log::debug!("Logging to {}", log_file.display());
    if let Some(env_file) = env_file {
        log::debug!("Loaded environment from {}", env_file.display());
    }

    let config = AppConfig::load();
    let storage = FileStorage::open(config.resolve_storage_dir()?)?;
    log::info!("State mirror at {}", storage.dir().display());

    let direct = ReqwestTransport::new();
    let connectivity = Arc::new(direct.connectivity().clone());
    let mut app = Storefront::build(&config, Arc::new(storage), direct, connectivity)?;
    app.error_handler.clone().install_panic_hook();

    app.products.load_products();
    let loaded = app
        .store
        .run_until(|state| !state.products.loading, FEED_TIMEOUT);
    if !loaded {
        app.error_handler
            .handle_error(&anyhow::anyhow!("Timed out waiting for the product feed"));
    }

    if let Some(error) = app.products.error() {
        log::warn!("Catalogue unavailable: {}", error);
    }
    for product in app.products.filtered_products() {
        log::info!(
            "{:<12} {:<32} {:>10.2} (rrp {:.2}, save {:.2})",
            product.sku,
            product.name,
            product.price,
            product.rrp,
            product.savings()
        );
    }

    log::info!(
        "Cart: {} item(s), total {:.2}",
        app.cart.total_items(),
        app.cart.total_price()
    );
    for item in app.cart.items() {
        log::info!("  {} x {}", item.quantity, item.product.name);
    }

    log::info!("Exiting storefront");
    Ok(())
}
