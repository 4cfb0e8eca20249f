use axum::extract::FromRef;

use crate::catalog_store::CatalogStore;
use crate::render::ViewRenderer;
use std::sync::Arc;

use super::ServerConfig;

pub type GuardedCatalogStore = Arc<dyn CatalogStore>;
pub type GuardedViewRenderer = Arc<dyn ViewRenderer>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub store: GuardedCatalogStore,
    pub renderer: GuardedViewRenderer,
}

impl FromRef<ServerState> for GuardedCatalogStore {
    fn from_ref(input: &ServerState) -> Self {
        input.store.clone()
    }
}

impl FromRef<ServerState> for GuardedViewRenderer {
    fn from_ref(input: &ServerState) -> Self {
        input.renderer.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
