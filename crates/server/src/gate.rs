//! Access gate
//!
//! Decides allow/kick for a player whose presence was just observed, and
//! records the outcome exactly once per event. The machine is
//! Start -> Verifying -> { Allowed | Kicking -> { Kicked, KickFailed } };
//! each terminal state maps to one [`AccessOutcome`]. Reporting is
//! fire-and-forget: a failed report never changes the decision and never
//! reaches the webhook caller.

use serde::Serialize;

use fraggate_core::{SessionHandle, SteamId64};

use crate::metrics;
use crate::state::AppState;

/// Terminal gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allowed,
    Denied,
    Error,
}

impl AccessDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessDecision::Allowed => "allow",
            AccessDecision::Denied => "deny",
            AccessDecision::Error => "error",
        }
    }
}

/// Decision plus its reason code, recorded to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessOutcome {
    pub decision: AccessDecision,
    pub reason: &'static str,
}

impl AccessOutcome {
    pub fn allowed() -> Self {
        Self {
            decision: AccessDecision::Allowed,
            reason: "verified",
        }
    }

    pub fn denied() -> Self {
        Self {
            decision: AccessDecision::Denied,
            reason: "not_verified",
        }
    }

    pub fn command_failed() -> Self {
        Self {
            decision: AccessDecision::Error,
            reason: "command_failed",
        }
    }
}

impl AppState {
    /// Run the gate for one observed presence (Connect or TeamJoin line).
    pub async fn gate_presence(
        &self,
        identity: SteamId64,
        session: Option<SessionHandle>,
    ) -> AccessOutcome {
        if let Some(session) = session {
            self.sessions.record(identity, session).await;
        }

        let backend = self.backend.clone();
        let fail_open = self.config.fail_open;
        let allow = self
            .verifications
            .lookup_or_refresh(identity, || async move {
                match backend.is_verified(identity).await {
                    Ok(verified) => verified,
                    Err(err) => {
                        tracing::warn!(
                            identity,
                            error = %err,
                            fail_open,
                            "verification lookup failed, using fallback"
                        );
                        fail_open
                    }
                }
            })
            .await;

        let outcome = if allow {
            AccessOutcome::allowed()
        } else {
            self.kick(identity, session).await
        };

        metrics::record_access_decision(outcome.decision.as_str(), outcome.reason);
        self.report_outcome(identity, outcome);
        outcome
    }

    /// Eject an unverified player, targeting the known session if any.
    async fn kick(&self, identity: SteamId64, session: Option<SessionHandle>) -> AccessOutcome {
        let target = match session {
            Some(session) => Some(session),
            None => self.sessions.last_known(identity).await,
        };
        let command = kick_command(target, &self.config.verify_url);

        match self.console.send(&command).await {
            Ok(()) => {
                tracing::info!(identity, ?target, "kicked unverified player");
                AccessOutcome::denied()
            }
            Err(err) => {
                tracing::warn!(identity, error = %err, "kick command failed");
                AccessOutcome::command_failed()
            }
        }
    }

    /// Record the outcome without blocking or failing the response.
    fn report_outcome(&self, identity: SteamId64, outcome: AccessOutcome) {
        let backend = self.backend.clone();
        tokio::spawn(async move {
            if let Err(err) = backend.record_access(identity, &outcome).await {
                tracing::debug!(identity, error = %err, "access record dropped");
            }
        });
    }
}

/// Build the ejection command line.
///
/// With a session handle on record the kick is targeted; without one the
/// best effort is a broadcast telling the player where to verify.
fn kick_command(target: Option<SessionHandle>, verify_url: &str) -> String {
    match target {
        Some(session) => {
            format!("kickid {session} \"Unverified player. Verify at {verify_url}\"")
        }
        None => format!("say \"Unverified player detected. Verify at {verify_url}\""),
    }
}
