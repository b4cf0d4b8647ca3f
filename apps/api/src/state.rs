use std::sync::Arc;

use crate::config::Config;
use crate::matching::engine::{MatchEngine, Recommender};
use crate::store::{ApplicationIndex, InMemoryStore, PostingStore, ProfileStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable recommender. Default: the attribute `MatchEngine`.
    pub recommender: Arc<dyn Recommender>,
    pub profiles: Arc<dyn ProfileStore>,
    pub postings: Arc<dyn PostingStore>,
    pub applications: Arc<dyn ApplicationIndex>,
}

impl AppState {
    /// Wires every store seam to one in-memory store.
    pub fn in_memory(config: Config, store: Arc<InMemoryStore>) -> anyhow::Result<Self> {
        let engine = MatchEngine::new(config.matching.clone())?;
        Ok(Self {
            config,
            recommender: Arc::new(engine),
            profiles: store.clone(),
            postings: store.clone(),
            applications: store,
        })
    }
}
