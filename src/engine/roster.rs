//! Roster lookup contract and the synthetic fallback used when no roster
//! data exists for a team.

use crate::engine::match_state::TeamInfo;

/// Players per side used when a roster has to be synthesized.
pub const FALLBACK_BATTING_SIZE: usize = 11;
/// Bowling options per side in a synthesized roster.
pub const FALLBACK_BOWLING_SIZE: usize = 6;

/// Source of team rosters, provided by the surrounding application.
///
/// Implementations return an empty list when they hold no data for a team;
/// the engine then falls back to synthetic placeholder names so matches can
/// still be scored (kept for tests and demo sessions).
pub trait RosterProvider: Send + Sync {
    /// Ordered batting lineup for the named team.
    fn batting_roster(&self, team: &str) -> Vec<String>;
    /// Bowling options for the named team.
    fn bowling_roster(&self, team: &str) -> Vec<String>;
}

/// Roster provider backed by nothing: every lookup misses, so every team
/// is synthesized. Used by the demo binary and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRoster;

impl RosterProvider for EmptyRoster {
    fn batting_roster(&self, _team: &str) -> Vec<String> {
        Vec::new()
    }

    fn bowling_roster(&self, _team: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Placeholder batting lineup for a team without roster data.
pub fn synthetic_batting_roster(team: &str) -> Vec<String> {
    (1..=FALLBACK_BATTING_SIZE)
        .map(|n| format!("{team} Batsman {n}"))
        .collect()
}

/// Placeholder bowling options for a team without roster data.
pub fn synthetic_bowling_roster(team: &str) -> Vec<String> {
    (1..=FALLBACK_BOWLING_SIZE)
        .map(|n| format!("{team} Bowler {n}"))
        .collect()
}

/// Resolve a team's rosters from the provider, synthesizing placeholders
/// for whichever lists come back empty.
pub fn resolve_team(provider: &dyn RosterProvider, name: &str) -> TeamInfo {
    let mut batting_order = provider.batting_roster(name);
    if batting_order.is_empty() {
        batting_order = synthetic_batting_roster(name);
    }
    let mut bowling_order = provider.bowling_roster(name);
    if bowling_order.is_empty() {
        bowling_order = synthetic_bowling_roster(name);
    }
    TeamInfo {
        name: name.to_string(),
        batting_order,
        bowling_order,
    }
}
