//! Shared application state.

use std::sync::Arc;

use tfar_store::{ModuleStore, ProviderStore, Transport};

/// State handed to every handler. Both stores share one transport.
#[derive(Debug, Clone)]
pub struct AppState {
    pub providers: ProviderStore,
    pub modules: ModuleStore,
}

impl AppState {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self {
            providers: ProviderStore::new(Arc::clone(&transport)),
            modules: ModuleStore::new(transport),
        }
    }
}
