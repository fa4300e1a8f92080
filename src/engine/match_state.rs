//! The mutable match aggregate owned by the scoring engine.
//!
//! All of a live match lives here: innings totals, batting and bowling
//! tables, crease occupancy, the pending-selection gate, and the ball log.
//! The rules that mutate it are in [`crate::engine::rules`].

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::engine::events::{BallRecord, CreaseEnd, Inning};
use crate::engine::stats::{BattingStats, BowlingStats};

/// Format a legal-ball count as cricket overs notation (`"18.4"`).
pub fn overs_string(legal_balls: u32) -> String {
    format!("{}.{}", legal_balls / 6, legal_balls % 6)
}

/// Match-level parameters fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRules {
    /// Overs available to each side.
    pub total_overs: u16,
}

impl MatchRules {
    /// Legal balls available to one innings.
    pub fn balls_per_innings(self) -> u32 {
        u32::from(self.total_overs) * 6
    }
}

/// One side of the match with its resolved rosters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamInfo {
    /// Display name of the team.
    pub name: String,
    /// Batting order, as resolved from the roster service or synthesized.
    pub batting_order: Vec<String>,
    /// Bowling options, same source.
    pub bowling_order: Vec<String>,
}

/// Extras conceded in one innings, broken down by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extras {
    /// Runs from wides.
    pub wides: u32,
    /// No-ball penalty runs (excludes runs off the bat).
    pub no_balls: u32,
    /// Byes.
    pub byes: u32,
    /// Leg byes.
    pub leg_byes: u32,
}

impl Extras {
    /// Total extras conceded.
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes
    }
}

/// Scoring state of one innings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InningsScore {
    /// Index into [`MatchState::teams`] of the batting side.
    pub batting_team: usize,
    /// Team total.
    pub runs: u32,
    /// Wickets lost (at most ten).
    pub wickets: u8,
    /// Legal balls bowled; drives the overs display.
    pub legal_balls: u32,
    /// Extras breakdown.
    pub extras: Extras,
    /// Batting table in batting order; entries appear on first involvement.
    pub batting: IndexMap<String, BattingStats>,
    /// Bowling table in first-bowled order.
    pub bowling: IndexMap<String, BowlingStats>,
    /// Players who cannot bat again this innings.
    pub dismissed: HashSet<String>,
    /// Bowler of the most recent completed over, ineligible for the next.
    pub last_over_bowler: Option<String>,
    /// Append-only ball log for this innings.
    pub log: Vec<BallRecord>,
}

impl InningsScore {
    fn new(batting_team: usize) -> Self {
        Self {
            batting_team,
            runs: 0,
            wickets: 0,
            legal_balls: 0,
            extras: Extras::default(),
            batting: IndexMap::new(),
            bowling: IndexMap::new(),
            dismissed: HashSet::new(),
            last_over_bowler: None,
            log: Vec::new(),
        }
    }

    /// Overs bowled so far in display notation.
    pub fn overs(&self) -> String {
        overs_string(self.legal_balls)
    }
}

/// Interaction the engine is waiting on before scoring may resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingSelection {
    /// Scoring is live.
    #[default]
    None,
    /// An over just finished; a replacement bowler must be named.
    NextBowler,
    /// A wicket fell without a nominated replacement batter.
    NextBatter {
        /// The vacated end the incoming batter will occupy.
        end: CreaseEnd,
    },
    /// The first innings closed; the chase needs openers and a bowler.
    SecondInningsSetup,
}

impl PendingSelection {
    /// Whether scoring is currently gated.
    pub fn is_none(self) -> bool {
        matches!(self, PendingSelection::None)
    }
}

impl fmt::Display for PendingSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingSelection::None => f.write_str("nothing"),
            PendingSelection::NextBowler => f.write_str("a next-bowler selection"),
            PendingSelection::NextBatter { .. } => f.write_str("a next-batter selection"),
            PendingSelection::SecondInningsSetup => f.write_str("second-innings setup"),
        }
    }
}

/// Final outcome of a completed match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// The chasing side reached its target.
    WonByWickets {
        /// Winning team name.
        team: String,
        /// Wickets in hand when the target fell.
        wickets: u8,
    },
    /// The defending side kept the chase short.
    WonByRuns {
        /// Winning team name.
        team: String,
        /// Margin in runs.
        runs: u32,
    },
    /// Scores finished level.
    Tied,
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::WonByWickets { team, wickets } => {
                write!(
                    f,
                    "{team} won by {wickets} wicket{}",
                    if *wickets == 1 { "" } else { "s" }
                )
            }
            MatchResult::WonByRuns { team, runs } => {
                write!(f, "{team} won by {runs} run{}", if *runs == 1 { "" } else { "s" })
            }
            MatchResult::Tied => f.write_str("Match tied"),
        }
    }
}

/// Opening crease assignment supplied when an innings goes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Openers {
    /// Batter taking first strike.
    pub striker: String,
    /// Batter at the bowler's end.
    pub non_striker: String,
    /// Bowler of the first over.
    pub bowler: String,
}

/// Root aggregate for a live match, exclusively owned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    /// Match identifier, also the persistence key.
    pub id: Uuid,
    /// The two sides; index 0 is "team one" in outbound payloads.
    pub teams: [TeamInfo; 2],
    /// Fixed match parameters.
    pub rules: MatchRules,
    /// Index of the side batting first (toss outcome).
    pub batting_first: usize,
    /// Innings in progress.
    pub inning: Inning,
    /// Completed overs in the current innings.
    pub over: u16,
    /// Legal balls bowled in the current over (0..=5 between deliveries).
    pub ball_in_over: u8,
    /// Both innings; the second stays zeroed until the break.
    pub innings: [InningsScore; 2],
    /// Chase target, set at the innings break.
    pub target: Option<u32>,
    /// Batter on strike.
    pub striker: Option<String>,
    /// Batter at the non-striker's end.
    pub non_striker: Option<String>,
    /// Bowler of the current over.
    pub bowler: Option<String>,
    /// Outstanding selection gating further scoring.
    pub pending: PendingSelection,
    /// Whether the match has finished.
    pub completed: bool,
    /// Result line once the match has finished.
    pub result: Option<MatchResult>,
    /// Idempotency marker: completion side effects have already run.
    pub result_processed: bool,
}

impl MatchState {
    /// Create a live match after the toss and opening-player selection.
    ///
    /// Fails with [`crate::engine::rules::InvalidEvent`] when the openers
    /// are not distinct members of the relevant rosters.
    pub fn new(
        id: Uuid,
        teams: [TeamInfo; 2],
        rules: MatchRules,
        batting_first: usize,
        openers: Openers,
    ) -> Result<Self, crate::engine::rules::InvalidEvent> {
        let batting_first = batting_first.min(1);
        let mut state = Self {
            id,
            teams,
            rules,
            batting_first,
            inning: Inning::First,
            over: 0,
            ball_in_over: 0,
            innings: [
                InningsScore::new(batting_first),
                InningsScore::new(1 - batting_first),
            ],
            target: None,
            striker: None,
            non_striker: None,
            bowler: None,
            pending: PendingSelection::None,
            completed: false,
            result: None,
            result_processed: false,
        };
        state.seat_openers(openers)?;
        Ok(state)
    }

    /// The innings currently being scored.
    pub fn current_innings(&self) -> &InningsScore {
        &self.innings[self.inning.index()]
    }

    pub(crate) fn current_innings_mut(&mut self) -> &mut InningsScore {
        &mut self.innings[self.inning.index()]
    }

    /// Index of the side currently batting.
    pub fn batting_side(&self) -> usize {
        self.current_innings().batting_team
    }

    /// Index of the side currently in the field.
    pub fn fielding_side(&self) -> usize {
        1 - self.batting_side()
    }

    /// Batting roster of the side currently at the crease.
    pub fn batting_roster(&self) -> &[String] {
        &self.teams[self.batting_side()].batting_order
    }

    /// Bowling roster of the fielding side.
    pub fn bowling_roster(&self) -> &[String] {
        &self.teams[self.fielding_side()].bowling_order
    }

    /// Score line for a team: `(runs, wickets, overs)` of its batting innings.
    pub fn team_score(&self, team: usize) -> (u32, u8, String) {
        let innings = if self.innings[0].batting_team == team {
            &self.innings[0]
        } else {
            &self.innings[1]
        };
        (innings.runs, innings.wickets, innings.overs())
    }

    /// The last `window` commentary lines of the current innings.
    pub fn commentary_window(&self, window: usize) -> Vec<String> {
        let log = &self.current_innings().log;
        let start = log.len().saturating_sub(window);
        log[start..].iter().map(ToString::to_string).collect()
    }

    /// Commentary line for the most recent log entry, if any.
    pub fn last_ball(&self) -> Option<String> {
        self.current_innings().log.last().map(ToString::to_string)
    }

    /// Flip the idempotency marker, returning `true` exactly once per match.
    ///
    /// Callers run completion side effects (final save, result broadcast)
    /// only when this returns `true`.
    pub fn mark_result_processed(&mut self) -> bool {
        if !self.completed || self.result_processed {
            return false;
        }
        self.result_processed = true;
        true
    }
}
