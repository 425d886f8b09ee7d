//! Last observed session handle per identity
//!
//! Session handles are only meaningful within one game-server process;
//! a newer Connect/TeamJoin line for the same identity supersedes the
//! handle on record. The map exists to target kick commands when the
//! triggering path has no handle of its own.

use std::collections::HashMap;

use tokio::sync::RwLock;

use fraggate_core::{SessionHandle, SteamId64};

/// Process-wide identity -> most recent session handle map.
pub struct SessionMap {
    entries: RwLock<HashMap<SteamId64, SessionHandle>>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Record the session observed for an identity, overwriting any prior.
    pub async fn record(&self, identity: SteamId64, session: SessionHandle) {
        self.entries.write().await.insert(identity, session);
    }

    /// Most recently observed session handle, if any.
    pub async fn last_known(&self, identity: SteamId64) -> Option<SessionHandle> {
        self.entries.read().await.get(&identity).copied()
    }

    /// Number of tracked identities
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for SessionMap {
    fn default() -> Self {
        Self::new()
    }
}
