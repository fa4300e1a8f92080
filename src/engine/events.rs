//! Tagged ball events and the scoring commands applied to a live match.
//!
//! Commentary lines are derived from the event tags rather than stored as
//! free-form text, which keeps the ball log append-only and replayable.

use std::fmt;

/// Which innings of the match is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inning {
    /// The side batting first is at the crease.
    First,
    /// The chase.
    Second,
}

impl Inning {
    /// Index into per-innings arrays.
    pub fn index(self) -> usize {
        match self {
            Inning::First => 0,
            Inning::Second => 1,
        }
    }

    /// Innings number as displayed to users (1 or 2).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// End of the pitch a batter currently occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreaseEnd {
    /// The batter facing the bowling.
    #[default]
    Striker,
    /// The batter at the bowler's end.
    NonStriker,
}

/// How a batter was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissalKind {
    /// Clean bowled.
    Bowled,
    /// Caught by a fielder.
    Caught,
    /// Run out attempting a run.
    RunOut,
    /// Batter disturbed their own stumps.
    HitWicket,
    /// Stumped by the keeper.
    Stumped,
    /// Stumped or run out off a wide; the wide runs are still awarded.
    WideWicket,
    /// Dismissed off a no-ball; the no-ball runs are still awarded.
    NoBallWicket,
    /// Run out while running byes.
    ByeWicket,
    /// Run out while running leg byes.
    LegByeWicket,
}

impl DismissalKind {
    /// Whether this delivery counts toward the six-ball over.
    pub fn counts_as_legal_ball(self) -> bool {
        !matches!(self, DismissalKind::WideWicket | DismissalKind::NoBallWicket)
    }

    /// Whether the bowler is credited with the wicket.
    pub fn credits_bowler(self) -> bool {
        !matches!(
            self,
            DismissalKind::RunOut | DismissalKind::ByeWicket | DismissalKind::LegByeWicket
        )
    }

    /// Dismissals that bundle extra runs with the wicket.
    pub fn is_combination(self) -> bool {
        self.extra_kind().is_some()
    }

    /// The extras category the bundled runs belong to, if any.
    pub fn extra_kind(self) -> Option<ExtraKind> {
        match self {
            DismissalKind::WideWicket => Some(ExtraKind::Wide),
            DismissalKind::NoBallWicket => Some(ExtraKind::NoBall),
            DismissalKind::ByeWicket => Some(ExtraKind::Bye),
            DismissalKind::LegByeWicket => Some(ExtraKind::LegBye),
            _ => None,
        }
    }

    /// Whether the caller may nominate the non-striker as the dismissed batter.
    /// Only run-outs (including the extras variants) can dismiss either end.
    pub fn allows_nominated_end(self) -> bool {
        matches!(self, DismissalKind::RunOut) || self.is_combination()
    }

    /// Short label used in dismissal text and commentary.
    pub fn label(self) -> &'static str {
        match self {
            DismissalKind::Bowled => "bowled",
            DismissalKind::Caught => "caught",
            DismissalKind::RunOut => "run out",
            DismissalKind::HitWicket => "hit wicket",
            DismissalKind::Stumped => "stumped",
            DismissalKind::WideWicket => "stumped off a wide",
            DismissalKind::NoBallWicket => "out off a no-ball",
            DismissalKind::ByeWicket => "run out (bye)",
            DismissalKind::LegByeWicket => "run out (leg bye)",
        }
    }
}

impl fmt::Display for DismissalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Runs awarded without being credited off the bat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraKind {
    /// Delivery out of the batter's reach; re-bowled.
    Wide,
    /// Illegal delivery; re-bowled, penalty run plus anything off the bat.
    NoBall,
    /// Runs taken without bat contact.
    Bye,
    /// Runs deflected off the batter's body.
    LegBye,
}

impl ExtraKind {
    /// Byes and leg byes consume one of the over's six balls; wides and
    /// no-balls are bowled again.
    pub fn counts_as_legal_ball(self) -> bool {
        matches!(self, ExtraKind::Bye | ExtraKind::LegBye)
    }

    /// Wides and no-balls go against the bowler's analysis; byes and leg
    /// byes are debited to the fielding side only.
    pub fn charged_to_bowler(self) -> bool {
        matches!(self, ExtraKind::Wide | ExtraKind::NoBall)
    }

    /// Label used in commentary and the extras breakdown.
    pub fn label(self) -> &'static str {
        match self {
            ExtraKind::Wide => "wide",
            ExtraKind::NoBall => "no-ball",
            ExtraKind::Bye => "bye",
            ExtraKind::LegBye => "leg bye",
        }
    }
}

impl fmt::Display for ExtraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A wicket as entered by the scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WicketCall {
    /// How the batter got out.
    pub kind: DismissalKind,
    /// Fielder involved (catcher, keeper, or the end that ran the batter out).
    pub fielder: Option<String>,
    /// Which end was dismissed. Ignored unless the kind allows nomination.
    pub dismissed_end: CreaseEnd,
    /// Incoming batter. May be omitted, in which case scoring gates on a
    /// next-batter selection.
    pub replacement: Option<String>,
    /// Runs bundled with a combination dismissal (wide/no-ball/bye/leg-bye
    /// wickets). Must be zero for plain dismissals.
    pub extra_runs: u16,
}

impl WicketCall {
    /// Plain dismissal of the striker with a known replacement.
    pub fn simple(kind: DismissalKind, replacement: impl Into<String>) -> Self {
        Self {
            kind,
            fielder: None,
            dismissed_end: CreaseEnd::Striker,
            replacement: Some(replacement.into()),
            extra_runs: 0,
        }
    }
}

/// A scoring command entered against a live match.
///
/// The full ordered sequence of accepted commands replays to an identical
/// match state, which is what the idempotence tests exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringEvent {
    /// Runs off the bat: 0, 1, 2, 3, 4 or 6.
    Runs(u8),
    /// A dismissal, possibly bundled with extra runs.
    Wicket(WicketCall),
    /// Wide, no-ball, bye or leg bye for a total number of runs.
    Extra {
        /// Category of the extra.
        kind: ExtraKind,
        /// Total runs awarded, penalty included.
        runs: u16,
    },
    /// Resolve a pending next-bowler selection.
    NextBowler(String),
    /// Resolve a pending next-batter selection.
    NextBatter(String),
    /// Resolve the second-innings setup gate with fresh openers.
    SecondInnings {
        /// Opening striker of the chase.
        striker: String,
        /// Opening non-striker of the chase.
        non_striker: String,
        /// Bowler opening the second innings.
        opening_bowler: String,
    },
}

/// One entry of the append-only ball log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallRecord {
    /// Completed overs at the time of the delivery.
    pub over: u16,
    /// Delivery number within the over (1-based; wides and no-balls repeat it).
    pub ball: u8,
    /// What happened.
    pub event: BallEvent,
}

/// What happened on a delivery, tagged rather than stringly typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BallEvent {
    /// Runs off the bat.
    Runs {
        /// Batter on strike.
        batter: String,
        /// Runs scored.
        runs: u8,
    },
    /// A wicket fell.
    Wicket {
        /// Dismissed batter.
        batter: String,
        /// How they got out.
        kind: DismissalKind,
        /// Bowler of the delivery.
        bowler: String,
        /// Fielder involved, if any.
        fielder: Option<String>,
        /// Runs bundled with the dismissal.
        runs: u16,
    },
    /// An extra was conceded.
    Extra {
        /// Category of the extra.
        kind: ExtraKind,
        /// Total runs awarded.
        runs: u16,
    },
    /// Marker appended when an over closes.
    OverComplete {
        /// The over that just finished (1-based).
        over: u16,
        /// Who bowled it.
        bowler: String,
    },
    /// Marker appended when an innings closes.
    InningsComplete {
        /// Final total of the innings.
        runs: u32,
        /// Wickets lost.
        wickets: u8,
    },
    /// Marker appended once the match result is known.
    MatchComplete {
        /// Human-readable result line.
        result: String,
    },
}

impl fmt::Display for BallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            BallEvent::Runs { batter, runs } => {
                let desc = match runs {
                    0 => "no run".to_string(),
                    1 => "1 run".to_string(),
                    4 => "FOUR".to_string(),
                    6 => "SIX".to_string(),
                    n => format!("{n} runs"),
                };
                write!(f, "{}.{} {batter}: {desc}", self.over, self.ball)
            }
            BallEvent::Wicket {
                batter,
                kind,
                bowler,
                fielder,
                runs,
            } => {
                write!(f, "{}.{} WICKET! {batter} {kind}", self.over, self.ball)?;
                if let Some(fielder) = fielder {
                    write!(f, " ({fielder})")?;
                }
                if kind.credits_bowler() {
                    write!(f, " b {bowler}")?;
                }
                if *runs > 0 {
                    write!(f, ", {runs} run{}", if *runs == 1 { "" } else { "s" })?;
                }
                Ok(())
            }
            BallEvent::Extra { kind, runs } => {
                write!(
                    f,
                    "{}.{} {kind}, {runs} run{}",
                    self.over,
                    self.ball,
                    if *runs == 1 { "" } else { "s" }
                )
            }
            BallEvent::OverComplete { over, bowler } => {
                write!(f, "End of over {over} ({bowler})")
            }
            BallEvent::InningsComplete { runs, wickets } => {
                write!(f, "End of innings: {runs}/{wickets}")
            }
            BallEvent::MatchComplete { result } => f.write_str(result),
        }
    }
}

/// Derived notifications emitted alongside a state transition for the
/// caller (persistence, feed, logging) to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Six legal balls have been bowled; a fresh bowler is required.
    OverCompleted {
        /// The over that just finished (1-based).
        over: u16,
        /// Bowler who is now ineligible for the next over.
        bowler: String,
    },
    /// An innings closed (all out, overs exhausted, or target reached).
    InningsCompleted {
        /// Which innings closed.
        inning: Inning,
    },
    /// The chase target is known.
    TargetSet {
        /// Runs required to win.
        target: u32,
    },
    /// The match is over.
    MatchCompleted {
        /// Final result line.
        result: String,
    },
}
