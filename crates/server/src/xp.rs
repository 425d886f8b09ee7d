//! XP award pipeline
//!
//! Kill lines credit the killer. Both the kill record and the XP credit
//! are best-effort: there is no idempotency key, a retry would risk
//! double credit, and a failure must never surface to the webhook.

use fraggate_core::SteamId64;

use crate::backend::KillRecord;
use crate::metrics;
use crate::state::AppState;

impl AppState {
    /// Record a kill and credit XP to the killer, swallowing failures.
    pub async fn award_kill(&self, killer: SteamId64, victim: SteamId64) {
        let record = KillRecord {
            match_id: self.config.match_id,
            killer,
            victim,
            assist: None,
            weapon: None,
        };
        if let Err(err) = self.backend.record_kill(&record).await {
            tracing::debug!(killer, victim, error = %err, "kill record dropped");
        }

        let amount = self.config.xp_per_kill;
        match self
            .backend
            .award_xp(killer, amount, "kill", self.config.match_id)
            .await
        {
            Ok(()) => {
                tracing::debug!(killer, amount, "xp awarded");
                metrics::record_xp_award("ok");
            }
            Err(err) => {
                tracing::debug!(killer, error = %err, "xp award dropped");
                metrics::record_xp_award("error");
            }
        }
    }
}
