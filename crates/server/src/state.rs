//! Server state: classifier, caches, and collaborator handles

use std::sync::Arc;

use fraggate_core::{GateConfig, LineClassifier};

use crate::backend::BackendClient;
use crate::cache::VerificationCache;
use crate::command::CommandChannel;
use crate::sessions::SessionMap;

/// Everything one webhook request needs, constructed once at startup.
///
/// The verification cache and session map are the only mutable state in
/// the process; holding them here instead of in globals lets tests build
/// isolated instances with mock collaborators.
pub struct AppState {
    pub config: GateConfig,
    pub classifier: LineClassifier,
    pub verifications: VerificationCache,
    pub sessions: SessionMap,
    pub backend: Arc<dyn BackendClient>,
    pub console: Arc<dyn CommandChannel>,
}

impl AppState {
    pub fn new(
        config: GateConfig,
        backend: Arc<dyn BackendClient>,
        console: Arc<dyn CommandChannel>,
    ) -> Self {
        let verifications = VerificationCache::new(config.verify_ttl(), config.max_cache_entries);
        Self {
            classifier: LineClassifier::new(),
            verifications,
            sessions: SessionMap::new(),
            config,
            backend,
            console,
        }
    }
}

/// Shared server state type
pub type SharedState = Arc<AppState>;

/// Create shared state from config and collaborators
pub fn create_shared_state(
    config: GateConfig,
    backend: Arc<dyn BackendClient>,
    console: Arc<dyn CommandChannel>,
) -> SharedState {
    Arc::new(AppState::new(config, backend, console))
}
