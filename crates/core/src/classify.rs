//! Log-line classification
//!
//! The ingest stream is the game server's raw log feed; most lines are
//! irrelevant chatter. Classification applies a fixed, ordered set of
//! patterns to each line and yields at most one event. The order is a
//! stable contract, not an accident of declaration: a kill line can
//! textually contain bracket-delimited numerals that lower-priority
//! patterns would also match, so presence patterns are tried before kill
//! patterns and the first match wins.

use regex::Regex;

use crate::event::Event;
use crate::identity::{to_steam64, IdEncoding, SteamId64};

/// Which event constructor a matched pattern feeds.
#[derive(Debug, Clone, Copy)]
enum Rule {
    ConnectLegacy,
    ConnectSteam3,
    TeamJoinLegacy,
    TeamJoinSteam3,
    KillLegacyPair,
    KillId64Pair,
}

/// Ordered first-match-wins classifier over single log lines.
///
/// Patterns are compiled once at construction; `classify` is pure and
/// never looks across lines.
pub struct LineClassifier {
    rules: Vec<(Regex, Rule)>,
}

impl LineClassifier {
    pub fn new() -> Self {
        // Priority order: connect, team-join, kill. Within each pair the
        // legacy encoding is tried before Steam3.
        let table: [(&str, Rule); 6] = [
            (
                r#"<(\d+)><STEAM_1:\d:(\d+)><[^>]*>" connected"#,
                Rule::ConnectLegacy,
            ),
            (
                r#"<(\d+)><\[U:1:(\d+)\]><[^>]*>" connected"#,
                Rule::ConnectSteam3,
            ),
            (
                r#"<(\d+)><STEAM_1:\d:(\d+)><[^>]*>" joined team "([^"]+)""#,
                Rule::TeamJoinLegacy,
            ),
            (
                r#"<(\d+)><\[U:1:(\d+)\]><[^>]*>" joined team "([^"]+)""#,
                Rule::TeamJoinSteam3,
            ),
            (
                r"STEAM_1:\d:(\d+).+?killed.+?STEAM_1:\d:(\d+)",
                Rule::KillLegacyPair,
            ),
            (r"<(\d{17})>.*killed.*<(\d{17})>", Rule::KillId64Pair),
        ];

        let rules = table
            .into_iter()
            .map(|(pattern, rule)| (Regex::new(pattern).unwrap(), rule))
            .collect();

        Self { rules }
    }

    /// Classify one line; `None` means the line is irrelevant and dropped.
    pub fn classify(&self, line: &str) -> Option<Event> {
        for (pattern, rule) in &self.rules {
            if let Some(caps) = pattern.captures(line) {
                return build_event(*rule, &caps);
            }
        }
        None
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn build_event(rule: Rule, caps: &regex::Captures<'_>) -> Option<Event> {
    match rule {
        Rule::ConnectLegacy | Rule::ConnectSteam3 => {
            let session = caps[1].parse().ok()?;
            let identity = normalize(rule, &caps[2])?;
            Some(Event::Connect { identity, session })
        }
        Rule::TeamJoinLegacy | Rule::TeamJoinSteam3 => {
            let session = caps[1].parse().ok()?;
            let identity = normalize(rule, &caps[2])?;
            Some(Event::TeamJoin {
                identity,
                session,
                team: caps[3].to_string(),
            })
        }
        Rule::KillLegacyPair => {
            let killer = to_steam64(IdEncoding::LegacyAccount, &caps[1]).ok()?;
            let victim = to_steam64(IdEncoding::LegacyAccount, &caps[2]).ok()?;
            Some(Event::Kill { killer, victim })
        }
        Rule::KillId64Pair => {
            // 17-digit ids are already canonical.
            let killer: SteamId64 = caps[1].parse().ok()?;
            let victim: SteamId64 = caps[2].parse().ok()?;
            Some(Event::Kill { killer, victim })
        }
    }
}

fn normalize(rule: Rule, digits: &str) -> Option<SteamId64> {
    let encoding = match rule {
        Rule::ConnectLegacy | Rule::TeamJoinLegacy => IdEncoding::LegacyAccount,
        Rule::ConnectSteam3 | Rule::TeamJoinSteam3 => IdEncoding::Steam3Universe1,
        _ => return None,
    };
    to_steam64(encoding, digits).ok()
}
