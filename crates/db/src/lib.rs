//! Storage layer for BookShop: entities, repository traits and the
//! in-memory store that backs them.

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod seed;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use repository::{CatalogRepository, CatalogWriter, OrderRepository};
pub use seed::SeedData;
