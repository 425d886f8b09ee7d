//! Shared test doubles: recording backend and console mocks.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use fraggate_core::{GateConfig, SteamId64};
use fraggate_server::{
    create_shared_state, AccessOutcome, BackendClient, CommandChannel, KillRecord, ServerError,
    SharedState,
};

/// Backend mock recording every call; failures are toggled per method.
#[derive(Default)]
pub struct MockBackend {
    pub verified: Mutex<HashMap<SteamId64, bool>>,
    pub verify_calls: AtomicUsize,
    pub fail_verify: AtomicBool,
    pub fail_xp: AtomicBool,
    pub access_records: Mutex<Vec<(SteamId64, AccessOutcome)>>,
    pub xp_awards: Mutex<Vec<(SteamId64, u32, String, u64)>>,
    pub kills: Mutex<Vec<KillRecord>>,
}

impl MockBackend {
    pub fn set_verified(&self, identity: SteamId64, verified: bool) {
        self.verified.lock().unwrap().insert(identity, verified);
    }
}

#[async_trait]
impl BackendClient for MockBackend {
    async fn is_verified(&self, identity: SteamId64) -> Result<bool, ServerError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_verify.load(Ordering::SeqCst) {
            return Err(ServerError::Backend("simulated outage".to_string()));
        }
        Ok(self
            .verified
            .lock()
            .unwrap()
            .get(&identity)
            .copied()
            .unwrap_or(false))
    }

    async fn record_access(
        &self,
        identity: SteamId64,
        outcome: &AccessOutcome,
    ) -> Result<(), ServerError> {
        self.access_records.lock().unwrap().push((identity, *outcome));
        Ok(())
    }

    async fn award_xp(
        &self,
        identity: SteamId64,
        amount: u32,
        reason: &str,
        match_id: u64,
    ) -> Result<(), ServerError> {
        if self.fail_xp.load(Ordering::SeqCst) {
            return Err(ServerError::Backend("simulated outage".to_string()));
        }
        self.xp_awards
            .lock()
            .unwrap()
            .push((identity, amount, reason.to_string(), match_id));
        Ok(())
    }

    async fn record_kill(&self, kill: &KillRecord) -> Result<(), ServerError> {
        self.kills.lock().unwrap().push(kill.clone());
        Ok(())
    }
}

/// Console mock recording every command line sent.
#[derive(Default)]
pub struct MockConsole {
    pub sent: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl CommandChannel for MockConsole {
    async fn send(&self, command: &str) -> Result<(), ServerError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ServerError::Command("simulated transport failure".to_string()));
        }
        self.sent.lock().unwrap().push(command.to_string());
        Ok(())
    }
}

/// Build isolated state wired to fresh mocks.
pub fn test_state(config: GateConfig) -> (SharedState, Arc<MockBackend>, Arc<MockConsole>) {
    let backend = Arc::new(MockBackend::default());
    let console = Arc::new(MockConsole::default());
    let state = create_shared_state(config, backend.clone(), console.clone());
    (state, backend, console)
}

/// Let detached outcome reports run to completion on the test runtime.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
