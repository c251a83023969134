//! Service bootstrap shared by the `shelf-app` binary and the CLI.

use anyhow::Context;
use sqlx::SqlitePool;

use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// A registry holding one service module and its migrated database.
pub struct Service {
    pub name: String,
    pub registry: ModuleRegistry,
    pub db: SqlitePool,
}

impl Service {
    /// Open the file-backed database for `name` and bring its schema up to date.
    pub async fn open(settings: &Settings, name: &str) -> anyhow::Result<Self> {
        let mut registry = ModuleRegistry::new();
        modules::register(&mut registry, name)?;

        let db = shelf_db::connect(&settings.database, name)
            .await
            .with_context(|| format!("failed to open database for '{name}'"))?;

        Self::with_pool(registry, name, db).await
    }

    /// Wrap an existing pool, applying any pending migrations.
    pub async fn with_pool(
        registry: ModuleRegistry,
        name: &str,
        db: SqlitePool,
    ) -> anyhow::Result<Self> {
        let applied = shelf_db::run_migrations(&db, &registry.collect_migrations())
            .await
            .with_context(|| format!("failed to migrate '{name}'"))?;
        tracing::info!(service = name, applied, "database ready");

        Ok(Self {
            name: name.to_string(),
            registry,
            db,
        })
    }

    pub fn ctx<'a>(&'a self, settings: &'a Settings) -> InitCtx<'a> {
        InitCtx {
            settings,
            db: &self.db,
        }
    }

    /// Run the module lifecycle around the HTTP server.
    pub async fn serve(self, settings: &Settings) -> anyhow::Result<()> {
        let ctx = self.ctx(settings);

        self.registry.init_modules(&ctx).await?;
        self.registry.start_modules(&ctx).await?;

        let served = shelf_http::start_server(&self.registry, &ctx).await;

        self.registry.stop_modules().await?;
        self.db.close().await;
        tracing::info!(service = %self.name, "service stopped");

        served
    }
}

/// Open, migrate and serve `service` until shutdown.
pub async fn serve(settings: &Settings, service: &str) -> anyhow::Result<()> {
    tracing::info!(
        service,
        env = ?settings.environment,
        db = ?settings.database.path_for(service),
        "shelf bootstrap starting"
    );

    Service::open(settings, service).await?.serve(settings).await
}

/// Only bring the schema of `service` up to date.
pub async fn migrate(settings: &Settings, service: &str) -> anyhow::Result<()> {
    let service = Service::open(settings, service).await?;
    service.db.close().await;
    Ok(())
}
