//! fraggate-server: log-webhook gate service
//!
//! Receives the game server's raw log feed over a webhook, classifies
//! kill / connect / team-join lines, credits XP for kills, and kicks
//! unverified players via the game-server console.

pub mod backend;
pub mod cache;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod gate;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod sessions;
pub mod state;
pub mod xp;

pub use backend::{BackendClient, HttpBackend, KillRecord};
pub use cache::{VerificationCache, VerificationEntry};
pub use command::{CommandChannel, DisabledConsole, HttpConsole};
pub use error::ServerError;
pub use gate::{AccessDecision, AccessOutcome};
pub use routes::{create_router, with_metrics};
pub use server::{GateServer, ServerBuilder};
pub use sessions::SessionMap;
pub use state::{create_shared_state, AppState, SharedState};
