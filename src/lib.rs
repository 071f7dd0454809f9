//! LIBRIS Application Library
//!
//! Library-catalog web application: server-rendered CRUD over authors,
//! genres, books, and book instances, with referential-integrity-aware
//! delete and validated create/update workflows.

pub mod modules;
pub mod seed;
pub mod utils;

use anyhow::Context;
use libris_kernel::settings::Settings;
use libris_kernel::{InitCtx, ModuleRegistry};

/// Full application bootstrap: telemetry, store, catalog modules, HTTP server.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    libris_telemetry::init(&settings.telemetry)?;

    tracing::info!(env = ?settings.environment, "libris bootstrap starting");

    let state = modules::CatalogState::new().context("failed to build catalog state")?;

    if settings.store.seed {
        seed::load_sample_catalog(state.store.as_ref())
            .await
            .context("failed to seed the sample catalog")?;
    }

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, state.clone());

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_custom_modules(&ctx).await?;
    registry.start_custom_modules(&ctx).await?;

    tracing::info!("libris bootstrap complete");

    let root = modules::home::router(state);
    libris_http::start_server(&registry, &settings, root).await
}
