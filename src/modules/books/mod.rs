pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};

use libris_kernel::{InitCtx, Module};

use super::CatalogState;

/// Books module: CRUD pages plus the referential delete guard against
/// copies still on the shelf.
pub struct BooksModule {
    state: CatalogState,
}

pub fn create_module(state: CatalogState) -> Arc<dyn Module> {
    Arc::new(BooksModule { state })
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
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
