pub mod config;
pub mod controllers;
pub mod engine;
pub mod error;
pub mod models;
pub mod persistence;

use std::sync::Arc;

use engine::Engine;
use persistence::SnapshotStore;

// Shared state for the whole application: one engine instance, constructed
// here and passed by handle to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub store: SnapshotStore,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> Arc<Self> {
        let engine = Arc::new(Engine::new());
        let store = SnapshotStore::new(&config.storage.data_dir);

        // A failed load is reported but not fatal: the engine starts empty
        // and in-memory state stays authoritative either way.
        if let Err(e) = store.load(&engine).await {
            tracing::warn!("snapshot load failed, starting empty: {e}");
        }

        Arc::new(Self {
            engine,
            store,
            config,
        })
    }
}
