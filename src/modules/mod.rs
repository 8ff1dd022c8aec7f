pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use bookshop_db::{CatalogRepository, CatalogWriter, MemoryStore, OrderRepository};
use bookshop_kernel::{settings::CatalogSettings, ModuleRegistry};

use admin::CatalogAdmin;
use cart::{CartAggregator, MemorySessionStore, SessionStore};
use catalog::CatalogService;
use orders::OrderService;

/// The services every module (and the CLI) is built from.
#[derive(Clone)]
pub struct Services {
    pub catalog: CatalogService,
    pub cart: CartAggregator,
    pub orders: OrderService,
    pub admin: CatalogAdmin,
}

impl Services {
    pub fn new(
        catalog_repo: Arc<dyn CatalogRepository>,
        catalog_writer: Arc<dyn CatalogWriter>,
        order_repo: Arc<dyn OrderRepository>,
        sessions: Arc<dyn SessionStore>,
        settings: CatalogSettings,
    ) -> Self {
        let catalog = CatalogService::new(catalog_repo, settings);
        let cart = CartAggregator::new(sessions, catalog.clone());
        let orders = OrderService::new(order_repo, cart.clone());
        Self {
            catalog,
            cart,
            orders,
            admin: CatalogAdmin::new(catalog_writer),
        }
    }

    /// Everything backed by one in-memory store and in-memory sessions
    pub fn in_memory(store: Arc<MemoryStore>, settings: CatalogSettings) -> Self {
        let catalog_repo: Arc<dyn CatalogRepository> = store.clone();
        let catalog_writer: Arc<dyn CatalogWriter> = store.clone();
        let order_repo: Arc<dyn OrderRepository> = store;
        Self::new(
            catalog_repo,
            catalog_writer,
            order_repo,
            Arc::new(MemorySessionStore::new()),
            settings,
        )
    }
}

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, services: &Services) -> anyhow::Result<()> {
    registry.register(catalog::create_module(services.catalog.clone()))?;
    registry.register(cart::create_module(services.cart.clone()))?;
    registry.register(orders::create_module(services.orders.clone()))?;
    registry.register(admin::create_module(services.admin.clone()))?;
    Ok(())
}
