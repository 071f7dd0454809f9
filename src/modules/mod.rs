pub mod authors;
pub mod bookinstances;
pub mod books;
pub mod genres;
pub mod home;

use std::sync::Arc;

use libris_http::Presenter;
use libris_kernel::ModuleRegistry;
use libris_store::MemoryStore;
use rust_embed::Embed;

/// Page templates compiled into the binary.
#[derive(Embed)]
#[folder = "templates/"]
struct Templates;

/// Shared handler state: the record store and the page presenter.
#[derive(Clone)]
pub struct CatalogState {
    pub store: Arc<MemoryStore>,
    pub pages: Arc<Presenter>,
}

impl CatalogState {
    pub fn new() -> anyhow::Result<Self> {
        let templates = Templates::iter().filter_map(|name| {
            let file = Templates::get(name.as_ref())?;
            let source = String::from_utf8(file.data.into_owned()).ok()?;
            Some((name.to_string(), source))
        });

        Ok(Self {
            store: Arc::new(MemoryStore::new()),
            pages: Arc::new(Presenter::from_templates(templates)?),
        })
    }
}

/// Register all catalog modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, state: CatalogState) {
    registry.register_custom(genres::create_module(state.clone()));
    registry.register_custom(authors::create_module(state.clone()));
    registry.register_custom(books::create_module(state.clone()));
    registry.register_custom(bookinstances::create_module(state));
}
