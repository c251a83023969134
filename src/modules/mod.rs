pub mod books;
pub mod recipes;

use std::sync::Arc;

use anyhow::anyhow;
use shelf_kernel::{Module, ModuleRegistry};

/// Names of the services this crate can run
pub const SERVICES: &[&str] = &["books", "recipes"];

/// Build the module backing `service`
pub fn create(service: &str) -> anyhow::Result<Arc<dyn Module>> {
    match service {
        "books" => Ok(books::create_module()),
        "recipes" => Ok(recipes::create_module()),
        other => Err(anyhow!(
            "unknown service '{}'; expected one of {:?}",
            other,
            SERVICES
        )),
    }
}

/// Register the module backing `service` with the registry
pub fn register(registry: &mut ModuleRegistry, service: &str) -> anyhow::Result<()> {
    registry.register(create(service)?);
    Ok(())
}
