//! Events extracted from game-server log lines

use serde::{Deserialize, Serialize};

use crate::identity::SteamId64;

/// Per-connection player slot, valid only for one game-server process.
///
/// Superseded whenever a newer Connect/TeamJoin line is observed for the
/// same identity; used to target kick commands.
pub type SessionHandle = u32;

/// One classified log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Kill {
        killer: SteamId64,
        victim: SteamId64,
    },
    Connect {
        identity: SteamId64,
        session: SessionHandle,
    },
    TeamJoin {
        identity: SteamId64,
        session: SessionHandle,
        team: String,
    },
}

impl Event {
    /// Identity whose presence this event announces, if any.
    ///
    /// Kill lines do not announce presence; only Connect/TeamJoin feed the
    /// access gate.
    pub fn presence(&self) -> Option<(SteamId64, SessionHandle)> {
        match self {
            Event::Connect { identity, session } => Some((*identity, *session)),
            Event::TeamJoin {
                identity, session, ..
            } => Some((*identity, *session)),
            Event::Kill { .. } => None,
        }
    }
}
