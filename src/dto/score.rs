//! Outbound score payloads consumed by the presentation layer after every
//! applied event, plus the full scorecard projection.

use serde::Serialize;
use uuid::Uuid;

use crate::engine::{Inning, InningsScore, MatchState};

/// Score line for one team.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TeamScore {
    /// Runs scored batting.
    pub runs: u32,
    /// Wickets lost batting.
    pub wickets: u8,
    /// Overs faced in display notation.
    pub overs: String,
}

/// Live match context attached to every score update.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MatchData {
    /// Innings in progress (1 or 2).
    pub current_inning: u8,
    /// Most recent commentary lines, oldest first.
    pub ball_by_ball: Vec<String>,
    /// The latest commentary line.
    pub last_ball: Option<String>,
}

/// Payload broadcast after each applied scoring event.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScoreUpdatePayload {
    /// Team one's score line.
    pub team1_score: TeamScore,
    /// Team two's score line.
    pub team2_score: TeamScore,
    /// Live context: innings, commentary window, last ball.
    pub match_data: MatchData,
}

impl ScoreUpdatePayload {
    /// Project the current state, truncating commentary to `window` lines.
    pub fn from_state(state: &MatchState, window: usize) -> Self {
        let score = |team: usize| {
            let (runs, wickets, overs) = state.team_score(team);
            TeamScore {
                runs,
                wickets,
                overs,
            }
        };
        Self {
            team1_score: score(0),
            team2_score: score(1),
            match_data: MatchData {
                current_inning: state.inning.number(),
                ball_by_ball: state.commentary_window(window),
                last_ball: state.last_ball(),
            },
        }
    }
}

/// One batting table row of the scorecard.
#[derive(Debug, Clone, Serialize)]
pub struct BattingLine {
    /// Player name.
    pub name: String,
    /// Runs off the bat.
    pub runs: u32,
    /// Legal balls faced.
    pub balls: u32,
    /// Scoreless balls.
    pub dots: u32,
    /// Fours hit.
    pub fours: u32,
    /// Sixes hit.
    pub sixes: u32,
    /// Runs per hundred balls.
    pub strike_rate: f64,
    /// Dismissal text, or `None` while not out.
    pub dismissal: Option<String>,
}

/// One bowling table row of the scorecard.
#[derive(Debug, Clone, Serialize)]
pub struct BowlingLine {
    /// Player name.
    pub name: String,
    /// Overs bowled in cricket notation.
    pub overs: f64,
    /// Runs conceded.
    pub runs_conceded: u32,
    /// Wickets credited.
    pub wickets: u32,
    /// Runs conceded per over, once a legal ball exists.
    pub economy: Option<f64>,
    /// Runs conceded per wicket, once a wicket exists.
    pub average: Option<f64>,
}

/// Extras section of an innings card.
#[derive(Debug, Clone, Serialize)]
pub struct ExtrasSummary {
    /// Runs from wides.
    pub wides: u32,
    /// No-ball penalties.
    pub no_balls: u32,
    /// Byes.
    pub byes: u32,
    /// Leg byes.
    pub leg_byes: u32,
    /// Total extras.
    pub total: u32,
}

/// Scorecard for one innings.
#[derive(Debug, Clone, Serialize)]
pub struct InningsCard {
    /// Name of the batting side.
    pub batting_team: String,
    /// Team total.
    pub runs: u32,
    /// Wickets lost.
    pub wickets: u8,
    /// Overs faced.
    pub overs: String,
    /// Extras breakdown.
    pub extras: ExtrasSummary,
    /// Batting table in batting order.
    pub batting: Vec<BattingLine>,
    /// Bowling table in first-bowled order.
    pub bowling: Vec<BowlingLine>,
}

/// Full scorecard projection for a match.
#[derive(Debug, Clone, Serialize)]
pub struct ScorecardView {
    /// Match identifier.
    pub match_id: Uuid,
    /// Innings in progress (1 or 2).
    pub current_inning: u8,
    /// Chase target once known.
    pub target: Option<u32>,
    /// Result line once the match is over.
    pub result: Option<String>,
    /// Innings cards, first innings first; the second appears once begun.
    pub innings: Vec<InningsCard>,
}

impl From<&MatchState> for ScorecardView {
    fn from(state: &MatchState) -> Self {
        let cards = state
            .innings
            .iter()
            .take(match state.inning {
                Inning::First => 1,
                Inning::Second => 2,
            })
            .map(|innings| innings_card(state, innings))
            .collect();

        Self {
            match_id: state.id,
            current_inning: state.inning.number(),
            target: state.target,
            result: state.result.as_ref().map(ToString::to_string),
            innings: cards,
        }
    }
}

fn innings_card(state: &MatchState, innings: &InningsScore) -> InningsCard {
    InningsCard {
        batting_team: state.teams[innings.batting_team].name.clone(),
        runs: innings.runs,
        wickets: innings.wickets,
        overs: innings.overs(),
        extras: ExtrasSummary {
            wides: innings.extras.wides,
            no_balls: innings.extras.no_balls,
            byes: innings.extras.byes,
            leg_byes: innings.extras.leg_byes,
            total: innings.extras.total(),
        },
        batting: innings
            .batting
            .iter()
            .map(|(name, stats)| BattingLine {
                name: name.clone(),
                runs: stats.runs,
                balls: stats.balls,
                dots: stats.dots,
                fours: stats.fours,
                sixes: stats.sixes,
                strike_rate: stats.strike_rate(),
                dismissal: stats.dismissal.clone(),
            })
            .collect(),
        bowling: innings
            .bowling
            .iter()
            .map(|(name, stats)| BowlingLine {
                name: name.clone(),
                overs: stats.overs(),
                runs_conceded: stats.runs_conceded,
                wickets: stats.wickets,
                economy: stats.economy(),
                average: stats.average(),
            })
            .collect(),
    }
}
