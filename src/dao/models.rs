//! Persisted snapshot models and their conversions to and from the
//! engine's runtime state.
//!
//! Entities are the serialization boundary: the engine types stay free of
//! storage concerns, and a store only ever sees these shapes.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{
    BallEvent, BallRecord, BattingStats, BowlingStats, CreaseEnd, DismissalKind, ExtraKind,
    Extras, Inning, InningsScore, MatchResult, MatchRules, MatchState, PendingSelection, TeamInfo,
};

/// One side of the match as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamEntity {
    /// Display name of the team.
    pub name: String,
    /// Resolved batting order.
    pub batting_order: Vec<String>,
    /// Resolved bowling options.
    pub bowling_order: Vec<String>,
}

/// Extras breakdown as persisted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtrasEntity {
    /// Runs from wides.
    pub wides: u32,
    /// No-ball penalty runs.
    pub no_balls: u32,
    /// Byes.
    pub byes: u32,
    /// Leg byes.
    pub leg_byes: u32,
}

/// One batting table row as persisted, keyed by player name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BattingEntryEntity {
    /// Player name.
    pub name: String,
    /// Runs off the bat.
    pub runs: u32,
    /// Legal balls faced.
    pub balls: u32,
    /// Scoreless balls faced.
    pub dots: u32,
    /// Fours hit.
    pub fours: u32,
    /// Sixes hit.
    pub sixes: u32,
    /// Dismissal text once out.
    pub dismissal: Option<String>,
}

/// One bowling table row as persisted, keyed by player name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BowlingEntryEntity {
    /// Player name.
    pub name: String,
    /// Wickets credited.
    pub wickets: u32,
    /// Runs conceded.
    pub runs_conceded: u32,
    /// Legal deliveries bowled.
    pub legal_balls: u32,
    /// All deliveries bowled.
    pub total_balls: u32,
}

/// Dismissal kind wire tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DismissalKindEntity {
    /// Clean bowled.
    Bowled,
    /// Caught.
    Caught,
    /// Run out.
    RunOut,
    /// Hit wicket.
    HitWicket,
    /// Stumped.
    Stumped,
    /// Wicket off a wide.
    WideWicket,
    /// Wicket off a no-ball.
    NoBallWicket,
    /// Run out taking byes.
    ByeWicket,
    /// Run out taking leg byes.
    LegByeWicket,
}

/// Extra kind wire tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ExtraKindEntity {
    /// Wide.
    Wide,
    /// No-ball.
    NoBall,
    /// Bye.
    Bye,
    /// Leg bye.
    LegBye,
}

/// Crease end wire tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CreaseEndEntity {
    /// The striker's end.
    Striker,
    /// The non-striker's end.
    NonStriker,
}

/// One ball-log event as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BallEventEntity {
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
        /// Dismissal kind.
        kind: DismissalKindEntity,
        /// Bowler of the delivery.
        bowler: String,
        /// Fielder involved.
        fielder: Option<String>,
        /// Runs bundled with the dismissal.
        runs: u16,
    },
    /// An extra was conceded.
    Extra {
        /// Extra category.
        kind: ExtraKindEntity,
        /// Total runs awarded.
        runs: u16,
    },
    /// Over marker.
    OverComplete {
        /// Finished over number.
        over: u16,
        /// Bowler of the over.
        bowler: String,
    },
    /// Innings marker.
    InningsComplete {
        /// Final total.
        runs: u32,
        /// Wickets lost.
        wickets: u8,
    },
    /// Match marker.
    MatchComplete {
        /// Result line.
        result: String,
    },
}

/// One ball-log record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BallRecordEntity {
    /// Completed overs at the delivery.
    pub over: u16,
    /// Delivery number within the over.
    pub ball: u8,
    /// The event.
    pub event: BallEventEntity,
}

/// Pending-selection gate as persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingSelectionEntity {
    /// Scoring is live.
    None,
    /// Awaiting a replacement bowler.
    NextBowler,
    /// Awaiting a replacement batter.
    NextBatter {
        /// The vacated end.
        end: CreaseEndEntity,
    },
    /// Awaiting second-innings openers.
    SecondInningsSetup,
}

/// Match result as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchResultEntity {
    /// Chasing side won.
    WonByWickets {
        /// Winning team.
        team: String,
        /// Wickets in hand.
        wickets: u8,
    },
    /// Defending side won.
    WonByRuns {
        /// Winning team.
        team: String,
        /// Margin in runs.
        runs: u32,
    },
    /// Scores level.
    Tied,
}

/// One innings as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InningsEntity {
    /// Index of the batting side.
    pub batting_team: usize,
    /// Team total.
    pub runs: u32,
    /// Wickets lost.
    pub wickets: u8,
    /// Legal balls bowled.
    pub legal_balls: u32,
    /// Extras breakdown.
    pub extras: ExtrasEntity,
    /// Batting table in batting order.
    pub batting: Vec<BattingEntryEntity>,
    /// Bowling table in first-bowled order.
    pub bowling: Vec<BowlingEntryEntity>,
    /// Dismissed players.
    pub dismissed: Vec<String>,
    /// Bowler of the last completed over.
    pub last_over_bowler: Option<String>,
    /// Ball log.
    pub log: Vec<BallRecordEntity>,
}

/// Aggregate match snapshot persisted by the storage layer, keyed by
/// [`MatchSnapshotEntity::id`]. The store treats this as opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchSnapshotEntity {
    /// Primary key of the match.
    pub id: Uuid,
    /// Both sides with their rosters.
    pub teams: [TeamEntity; 2],
    /// Overs per innings.
    pub total_overs: u16,
    /// Index of the side that batted first.
    pub batting_first: usize,
    /// Innings in progress (1 or 2).
    pub inning: u8,
    /// Completed overs in the current innings.
    pub over: u16,
    /// Legal balls in the current over.
    pub ball_in_over: u8,
    /// Both innings.
    pub innings: [InningsEntity; 2],
    /// Chase target.
    pub target: Option<u32>,
    /// Batter on strike.
    pub striker: Option<String>,
    /// Batter at the non-striker's end.
    pub non_striker: Option<String>,
    /// Current bowler.
    pub bowler: Option<String>,
    /// Outstanding selection gate.
    pub pending: PendingSelectionEntity,
    /// Whether the match has finished.
    pub completed: bool,
    /// Result once finished.
    pub result: Option<MatchResultEntity>,
    /// Completion side effects already ran.
    pub result_processed: bool,
    /// Last time this snapshot was captured.
    pub updated_at: SystemTime,
}

impl MatchSnapshotEntity {
    /// Capture the current engine state as a persistable snapshot, stamped
    /// with the current time.
    pub fn capture(state: &MatchState) -> Self {
        Self {
            id: state.id,
            teams: state.teams.clone().map(Into::into),
            total_overs: state.rules.total_overs,
            batting_first: state.batting_first,
            inning: state.inning.number(),
            over: state.over,
            ball_in_over: state.ball_in_over,
            innings: state.innings.clone().map(Into::into),
            target: state.target,
            striker: state.striker.clone(),
            non_striker: state.non_striker.clone(),
            bowler: state.bowler.clone(),
            pending: state.pending.into(),
            completed: state.completed,
            result: state.result.clone().map(Into::into),
            result_processed: state.result_processed,
            updated_at: SystemTime::now(),
        }
    }
}

/// Subset of the snapshot returned by match listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchListItemEntity {
    /// Primary key of the match.
    pub id: Uuid,
    /// Team names.
    pub teams: [String; 2],
    /// Overs per innings.
    pub total_overs: u16,
    /// Whether the match has finished.
    pub completed: bool,
    /// Result line once finished.
    pub result: Option<String>,
    /// Last snapshot time.
    pub updated_at: SystemTime,
}

impl From<&MatchSnapshotEntity> for MatchListItemEntity {
    fn from(snapshot: &MatchSnapshotEntity) -> Self {
        Self {
            id: snapshot.id,
            teams: [snapshot.teams[0].name.clone(), snapshot.teams[1].name.clone()],
            total_overs: snapshot.total_overs,
            completed: snapshot.completed,
            result: snapshot
                .result
                .clone()
                .map(|result| MatchResult::from(result).to_string()),
            updated_at: snapshot.updated_at,
        }
    }
}

impl From<TeamInfo> for TeamEntity {
    fn from(value: TeamInfo) -> Self {
        Self {
            name: value.name,
            batting_order: value.batting_order,
            bowling_order: value.bowling_order,
        }
    }
}

impl From<TeamEntity> for TeamInfo {
    fn from(value: TeamEntity) -> Self {
        Self {
            name: value.name,
            batting_order: value.batting_order,
            bowling_order: value.bowling_order,
        }
    }
}

impl From<Extras> for ExtrasEntity {
    fn from(value: Extras) -> Self {
        Self {
            wides: value.wides,
            no_balls: value.no_balls,
            byes: value.byes,
            leg_byes: value.leg_byes,
        }
    }
}

impl From<ExtrasEntity> for Extras {
    fn from(value: ExtrasEntity) -> Self {
        Self {
            wides: value.wides,
            no_balls: value.no_balls,
            byes: value.byes,
            leg_byes: value.leg_byes,
        }
    }
}

impl From<DismissalKind> for DismissalKindEntity {
    fn from(value: DismissalKind) -> Self {
        match value {
            DismissalKind::Bowled => Self::Bowled,
            DismissalKind::Caught => Self::Caught,
            DismissalKind::RunOut => Self::RunOut,
            DismissalKind::HitWicket => Self::HitWicket,
            DismissalKind::Stumped => Self::Stumped,
            DismissalKind::WideWicket => Self::WideWicket,
            DismissalKind::NoBallWicket => Self::NoBallWicket,
            DismissalKind::ByeWicket => Self::ByeWicket,
            DismissalKind::LegByeWicket => Self::LegByeWicket,
        }
    }
}

impl From<DismissalKindEntity> for DismissalKind {
    fn from(value: DismissalKindEntity) -> Self {
        match value {
            DismissalKindEntity::Bowled => Self::Bowled,
            DismissalKindEntity::Caught => Self::Caught,
            DismissalKindEntity::RunOut => Self::RunOut,
            DismissalKindEntity::HitWicket => Self::HitWicket,
            DismissalKindEntity::Stumped => Self::Stumped,
            DismissalKindEntity::WideWicket => Self::WideWicket,
            DismissalKindEntity::NoBallWicket => Self::NoBallWicket,
            DismissalKindEntity::ByeWicket => Self::ByeWicket,
            DismissalKindEntity::LegByeWicket => Self::LegByeWicket,
        }
    }
}

impl From<ExtraKind> for ExtraKindEntity {
    fn from(value: ExtraKind) -> Self {
        match value {
            ExtraKind::Wide => Self::Wide,
            ExtraKind::NoBall => Self::NoBall,
            ExtraKind::Bye => Self::Bye,
            ExtraKind::LegBye => Self::LegBye,
        }
    }
}

impl From<ExtraKindEntity> for ExtraKind {
    fn from(value: ExtraKindEntity) -> Self {
        match value {
            ExtraKindEntity::Wide => Self::Wide,
            ExtraKindEntity::NoBall => Self::NoBall,
            ExtraKindEntity::Bye => Self::Bye,
            ExtraKindEntity::LegBye => Self::LegBye,
        }
    }
}

impl From<CreaseEnd> for CreaseEndEntity {
    fn from(value: CreaseEnd) -> Self {
        match value {
            CreaseEnd::Striker => Self::Striker,
            CreaseEnd::NonStriker => Self::NonStriker,
        }
    }
}

impl From<CreaseEndEntity> for CreaseEnd {
    fn from(value: CreaseEndEntity) -> Self {
        match value {
            CreaseEndEntity::Striker => Self::Striker,
            CreaseEndEntity::NonStriker => Self::NonStriker,
        }
    }
}

impl From<BallEvent> for BallEventEntity {
    fn from(value: BallEvent) -> Self {
        match value {
            BallEvent::Runs { batter, runs } => Self::Runs { batter, runs },
            BallEvent::Wicket {
                batter,
                kind,
                bowler,
                fielder,
                runs,
            } => Self::Wicket {
                batter,
                kind: kind.into(),
                bowler,
                fielder,
                runs,
            },
            BallEvent::Extra { kind, runs } => Self::Extra {
                kind: kind.into(),
                runs,
            },
            BallEvent::OverComplete { over, bowler } => Self::OverComplete { over, bowler },
            BallEvent::InningsComplete { runs, wickets } => {
                Self::InningsComplete { runs, wickets }
            }
            BallEvent::MatchComplete { result } => Self::MatchComplete { result },
        }
    }
}

impl From<BallEventEntity> for BallEvent {
    fn from(value: BallEventEntity) -> Self {
        match value {
            BallEventEntity::Runs { batter, runs } => Self::Runs { batter, runs },
            BallEventEntity::Wicket {
                batter,
                kind,
                bowler,
                fielder,
                runs,
            } => Self::Wicket {
                batter,
                kind: kind.into(),
                bowler,
                fielder,
                runs,
            },
            BallEventEntity::Extra { kind, runs } => Self::Extra {
                kind: kind.into(),
                runs,
            },
            BallEventEntity::OverComplete { over, bowler } => Self::OverComplete { over, bowler },
            BallEventEntity::InningsComplete { runs, wickets } => {
                Self::InningsComplete { runs, wickets }
            }
            BallEventEntity::MatchComplete { result } => Self::MatchComplete { result },
        }
    }
}

impl From<BallRecord> for BallRecordEntity {
    fn from(value: BallRecord) -> Self {
        Self {
            over: value.over,
            ball: value.ball,
            event: value.event.into(),
        }
    }
}

impl From<BallRecordEntity> for BallRecord {
    fn from(value: BallRecordEntity) -> Self {
        Self {
            over: value.over,
            ball: value.ball,
            event: value.event.into(),
        }
    }
}

impl From<PendingSelection> for PendingSelectionEntity {
    fn from(value: PendingSelection) -> Self {
        match value {
            PendingSelection::None => Self::None,
            PendingSelection::NextBowler => Self::NextBowler,
            PendingSelection::NextBatter { end } => Self::NextBatter { end: end.into() },
            PendingSelection::SecondInningsSetup => Self::SecondInningsSetup,
        }
    }
}

impl From<PendingSelectionEntity> for PendingSelection {
    fn from(value: PendingSelectionEntity) -> Self {
        match value {
            PendingSelectionEntity::None => Self::None,
            PendingSelectionEntity::NextBowler => Self::NextBowler,
            PendingSelectionEntity::NextBatter { end } => Self::NextBatter { end: end.into() },
            PendingSelectionEntity::SecondInningsSetup => Self::SecondInningsSetup,
        }
    }
}

impl From<MatchResult> for MatchResultEntity {
    fn from(value: MatchResult) -> Self {
        match value {
            MatchResult::WonByWickets { team, wickets } => Self::WonByWickets { team, wickets },
            MatchResult::WonByRuns { team, runs } => Self::WonByRuns { team, runs },
            MatchResult::Tied => Self::Tied,
        }
    }
}

impl From<MatchResultEntity> for MatchResult {
    fn from(value: MatchResultEntity) -> Self {
        match value {
            MatchResultEntity::WonByWickets { team, wickets } => {
                Self::WonByWickets { team, wickets }
            }
            MatchResultEntity::WonByRuns { team, runs } => Self::WonByRuns { team, runs },
            MatchResultEntity::Tied => Self::Tied,
        }
    }
}

impl From<InningsScore> for InningsEntity {
    fn from(value: InningsScore) -> Self {
        Self {
            batting_team: value.batting_team,
            runs: value.runs,
            wickets: value.wickets,
            legal_balls: value.legal_balls,
            extras: value.extras.into(),
            batting: value
                .batting
                .into_iter()
                .map(|(name, stats)| BattingEntryEntity {
                    name,
                    runs: stats.runs,
                    balls: stats.balls,
                    dots: stats.dots,
                    fours: stats.fours,
                    sixes: stats.sixes,
                    dismissal: stats.dismissal,
                })
                .collect(),
            bowling: value
                .bowling
                .into_iter()
                .map(|(name, stats)| BowlingEntryEntity {
                    name,
                    wickets: stats.wickets,
                    runs_conceded: stats.runs_conceded,
                    legal_balls: stats.legal_balls,
                    total_balls: stats.total_balls,
                })
                .collect(),
            dismissed: value.dismissed.into_iter().collect(),
            last_over_bowler: value.last_over_bowler,
            log: value.log.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<InningsEntity> for InningsScore {
    fn from(value: InningsEntity) -> Self {
        Self {
            batting_team: value.batting_team,
            runs: value.runs,
            wickets: value.wickets,
            legal_balls: value.legal_balls,
            extras: value.extras.into(),
            batting: value
                .batting
                .into_iter()
                .map(|entry| {
                    (
                        entry.name,
                        BattingStats {
                            runs: entry.runs,
                            balls: entry.balls,
                            dots: entry.dots,
                            fours: entry.fours,
                            sixes: entry.sixes,
                            dismissal: entry.dismissal,
                        },
                    )
                })
                .collect(),
            bowling: value
                .bowling
                .into_iter()
                .map(|entry| {
                    (
                        entry.name,
                        BowlingStats {
                            wickets: entry.wickets,
                            runs_conceded: entry.runs_conceded,
                            legal_balls: entry.legal_balls,
                            total_balls: entry.total_balls,
                        },
                    )
                })
                .collect(),
            dismissed: value.dismissed.into_iter().collect(),
            last_over_bowler: value.last_over_bowler,
            log: value.log.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<MatchSnapshotEntity> for MatchState {
    fn from(value: MatchSnapshotEntity) -> Self {
        Self {
            id: value.id,
            teams: value.teams.map(Into::into),
            rules: MatchRules {
                total_overs: value.total_overs,
            },
            batting_first: value.batting_first,
            inning: if value.inning >= 2 {
                Inning::Second
            } else {
                Inning::First
            },
            over: value.over,
            ball_in_over: value.ball_in_over,
            innings: value.innings.map(Into::into),
            target: value.target,
            striker: value.striker,
            non_striker: value.non_striker,
            bowler: value.bowler,
            pending: value.pending.into(),
            completed: value.completed,
            result: value.result.map(Into::into),
            result_processed: value.result_processed,
        }
    }
}
