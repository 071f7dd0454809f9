pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};

use libris_kernel::{InitCtx, Module};

use super::CatalogState;

/// Genres module: CRUD pages plus the referential delete guard against
/// dependent books.
pub struct GenresModule {
    state: CatalogState,
}

pub fn create_module(state: CatalogState) -> Arc<dyn Module> {
    Arc::new(GenresModule { state })
}

#[async_trait]
impl Module for GenresModule {
    fn name(&self) -> &'static str {
        "genres"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "genres module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::list))
            .route("/create", get(routes::create_form).post(routes::create))
            .route("/{id}", get(routes::detail))
            .route("/{id}/delete", get(routes::delete_form).post(routes::delete))
            .route("/{id}/update", get(routes::update_form).post(routes::update))
            .with_state(self.state.clone())
    }
}
