//! Canonical player identity
//!
//! Game logs carry player ids in two textual encodings: the legacy
//! `STEAM_1:X:N` form, where `N` is an account numeral that reaches the
//! canonical 64-bit id via `N * 2 + OFFSET`, and the Steam3 `[U:1:N]`
//! form, where `N` only needs the additive `OFFSET`. Both collapse to one
//! comparable `SteamId64` so that verification and session state keyed by
//! identity survive a server switching log formats.

use crate::error::Error;
use crate::Result;

/// Canonical 64-bit Steam id.
pub type SteamId64 = u64;

/// Base of the universe-1 individual-account id space.
pub const STEAM64_OFFSET: u64 = 76_561_197_960_265_728;

/// Which textual encoding a raw digit string was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdEncoding {
    /// Account numeral from a `STEAM_1:X:N` token.
    LegacyAccount,
    /// Numeral from a `[U:1:N]` token.
    Steam3Universe1,
}

/// Convert a raw digit string in the given encoding to a canonical id.
///
/// The classifier only passes digit strings already validated by its
/// patterns, so failures here mean the digits do not fit in 64 bits.
pub fn to_steam64(encoding: IdEncoding, digits: &str) -> Result<SteamId64> {
    let value: u64 = digits.parse().map_err(|_| Error::InvalidIdentity {
        digits: digits.to_string(),
    })?;

    let id = match encoding {
        IdEncoding::LegacyAccount => value
            .checked_mul(2)
            .and_then(|v| v.checked_add(STEAM64_OFFSET)),
        IdEncoding::Steam3Universe1 => value.checked_add(STEAM64_OFFSET),
    };

    id.ok_or_else(|| Error::InvalidIdentity {
        digits: digits.to_string(),
    })
}
