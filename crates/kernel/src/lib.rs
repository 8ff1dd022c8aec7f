//! Kernel of the BookShop application: layered settings, the `Module`
//! lifecycle trait and the registry that drives it.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
