use std::sync::Arc;

use crate::config::Config;
use crate::ingest::scoring::ScoringWeights;
use crate::roster::store::RosterStore;
use crate::source::SourceProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Current candidate snapshot, swapped on ingest or reload.
    pub roster: RosterStore,
    /// Configured source for reloads. `None` when serving the bundled sample only.
    pub source: Option<Arc<dyn SourceProvider>>,
    pub weights: Arc<ScoringWeights>,
}
