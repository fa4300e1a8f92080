//! The cricket scoring engine: match aggregate, scoring rules, derived
//! statistics, and the roster contract.
//!
//! The engine is pure in-memory logic; persistence and broadcasting live in
//! the service layer, which drives it one [`events::ScoringEvent`] at a time.

/// Ball events, scoring commands, and derived engine notifications.
pub mod events;
/// The `MatchState` aggregate and its supporting value types.
pub mod match_state;
/// Roster lookup contract and synthetic fallback rosters.
pub mod roster;
/// Event application rules and the `InvalidEvent` taxonomy.
pub mod rules;
/// Batting and bowling figures.
pub mod stats;

pub use events::{
    BallEvent, BallRecord, CreaseEnd, DismissalKind, EngineEvent, ExtraKind, Inning, ScoringEvent,
    WicketCall,
};
pub use match_state::{
    Extras, InningsScore, MatchResult, MatchRules, MatchState, Openers, PendingSelection, TeamInfo,
    overs_string,
};
pub use roster::RosterProvider;
pub use rules::InvalidEvent;
pub use stats::{BattingStats, BowlingStats};
