//! fraggate-core: domain types for the log-webhook gate
//!
//! This crate holds the pure, I/O-free pieces of fraggate:
//! - canonical player identity and the two textual encodings it is
//!   derived from (`identity`)
//! - the event model extracted from log lines (`event`)
//! - the ordered first-match-wins line classifier (`classify`)
//! - service configuration (`config`)
//!
//! The server crate wires these into the webhook, the verification cache,
//! the access gate, and the XP pipeline.

mod classify;
mod config;
mod error;
mod event;
mod identity;

pub use classify::LineClassifier;
pub use config::{GateConfig, DEFAULT_VERIFY_TTL_SECS, DEFAULT_XP_PER_KILL};
pub use error::Error;
pub use event::{Event, SessionHandle};
pub use identity::{to_steam64, IdEncoding, SteamId64, STEAM64_OFFSET};

pub type Result<T> = std::result::Result<T, Error>;
