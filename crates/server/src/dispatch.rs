//! Ingestion dispatcher
//!
//! Splits an inbound payload into lines, classifies each one, and routes
//! the result: Connect/TeamJoin to the access gate, Kill to the XP
//! pipeline. Lines are handled sequentially, so session-map writes for
//! one identity land in line order. Nothing here returns an error; every
//! per-line failure is already swallowed inside the pipelines.

use fraggate_core::Event;

use crate::metrics;
use crate::state::AppState;

impl AppState {
    /// Ingest one webhook payload. Never fails.
    pub async fn ingest(&self, payload: &str) {
        let mut matched = 0usize;

        for line in payload.lines() {
            match self.classifier.classify(line) {
                Some(Event::Kill { killer, victim }) => {
                    metrics::record_line("kill");
                    self.award_kill(killer, victim).await;
                    matched += 1;
                }
                Some(event @ (Event::Connect { .. } | Event::TeamJoin { .. })) => {
                    metrics::record_line(match event {
                        Event::Connect { .. } => "connect",
                        _ => "team_join",
                    });
                    if let Some((identity, session)) = event.presence() {
                        let outcome = self.gate_presence(identity, Some(session)).await;
                        tracing::debug!(
                            identity,
                            session,
                            decision = outcome.decision.as_str(),
                            reason = outcome.reason,
                            "gated presence"
                        );
                    }
                    matched += 1;
                }
                None => {}
            }
        }

        if matched > 0 {
            tracing::debug!(events = matched, "processed log batch");
        }
    }
}
