//! BookShop application library
//!
//! Catalog, cart, order and catalog-admin modules plus the glue that turns settings into a
//! running server. The binary and the CLI both build on [`bootstrap`].

pub mod error;
pub mod modules;
pub mod utils;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use bookshop_db::{MemoryStore, SeedData};
use bookshop_kernel::{
    settings::{DatabaseSettings, Settings},
    InitCtx, ModuleRegistry,
};

pub use error::ShopError;
pub use modules::Services;

/// Load the configured seed document, or the bundled sample catalog.
pub fn open_store(settings: &DatabaseSettings) -> anyhow::Result<Arc<MemoryStore>> {
    let seed = match &settings.seed_path {
        Some(path) => SeedData::from_path(Path::new(path))
            .with_context(|| format!("failed to read seed data from {}", path))?,
        None => SeedData::sample().context("bundled sample catalog is invalid")?,
    };

    let store = MemoryStore::from_seed(seed).context("seed data rejected")?;
    Ok(Arc::new(store))
}

/// Build the services and a registry holding every module.
pub fn bootstrap(settings: &Settings) -> anyhow::Result<(Services, ModuleRegistry)> {
    let store = open_store(&settings.database)?;
    let services = Services::in_memory(store, settings.catalog.clone());

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &services)?;

    Ok((services, registry))
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let (_services, registry) = bootstrap(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookshop_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
