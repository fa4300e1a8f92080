//! Payloads used to bootstrap a live match, and the summary returned once
//! one exists.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dao::models::MatchListItemEntity;
use crate::dto::{
    format_system_time,
    validation::{validate_player_name, validate_team_name},
};
use crate::engine::MatchState;

/// Payload used to create a brand-new live match.
///
/// Roster lists may be left empty, in which case synthetic placeholder
/// names fill the lineup. Omitting `openers` seats the first two batters
/// and the first bowler from the resolved rosters.
#[derive(Debug, Deserialize, Validate)]
pub struct NewMatchRequest {
    /// Exactly two competing teams.
    #[validate(
        length(min = 2, max = 2, message = "a match needs exactly two teams"),
        nested
    )]
    pub teams: Vec<TeamSetupInput>,
    /// Overs per innings; the configured default applies when omitted.
    #[validate(range(min = 1, max = 50))]
    pub total_overs: Option<u16>,
    /// Index of the side batting first. A coin toss decides when omitted.
    #[validate(range(max = 1))]
    pub batting_first: Option<u8>,
    /// Opening crease assignment.
    #[serde(default)]
    #[validate(nested)]
    pub openers: Option<OpenersInput>,
}

/// Incoming team definition for the match bootstrap.
#[derive(Debug, Deserialize, Serialize)]
pub struct TeamSetupInput {
    /// Team display name.
    pub name: String,
    /// Batting order; empty means "synthesize placeholders".
    #[serde(default)]
    pub players: Vec<String>,
    /// Bowling options; empty means "synthesize placeholders".
    #[serde(default)]
    pub bowlers: Vec<String>,
}

impl Validate for TeamSetupInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_team_name(&self.name) {
            errors.add("name", e);
        }

        for player in self.players.iter().chain(self.bowlers.iter()) {
            if let Err(e) = validate_player_name(player) {
                errors.add("players", e);
                break;
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Opening crease assignment supplied with the bootstrap payload.
#[derive(Debug, Deserialize)]
pub struct OpenersInput {
    /// Batter taking first strike.
    pub striker: String,
    /// Batter at the bowler's end.
    pub non_striker: String,
    /// Bowler of the first over.
    pub bowler: String,
}

impl Validate for OpenersInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, name) in [
            ("striker", &self.striker),
            ("non_striker", &self.non_striker),
            ("bowler", &self.bowler),
        ] {
            if let Err(e) = validate_player_name(name) {
                errors.add(field, e);
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Summary returned once a match has been created or loaded.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    /// Match identifier.
    pub id: Uuid,
    /// Team names, index 0 being "team one".
    pub teams: [String; 2],
    /// Overs per innings.
    pub total_overs: u16,
    /// Index of the side batting first.
    pub batting_first: usize,
    /// Innings in progress (1 or 2).
    pub current_inning: u8,
    /// Human-readable pending-selection gate, if any.
    pub pending: Option<String>,
    /// Whether the match has finished.
    pub completed: bool,
    /// Result line once finished.
    pub result: Option<String>,
}

impl From<&MatchState> for MatchSummary {
    fn from(state: &MatchState) -> Self {
        Self {
            id: state.id,
            teams: [state.teams[0].name.clone(), state.teams[1].name.clone()],
            total_overs: state.rules.total_overs,
            batting_first: state.batting_first,
            current_inning: state.inning.number(),
            pending: if state.pending.is_none() {
                None
            } else {
                Some(state.pending.to_string())
            },
            completed: state.completed,
            result: state.result.as_ref().map(ToString::to_string),
        }
    }
}

/// One row of the stored-match listing.
#[derive(Debug, Clone, Serialize)]
pub struct MatchListItem {
    /// Match identifier.
    pub id: Uuid,
    /// Team names.
    pub teams: [String; 2],
    /// Overs per innings.
    pub total_overs: u16,
    /// Whether the match has finished.
    pub completed: bool,
    /// Result line once finished.
    pub result: Option<String>,
    /// RFC 3339 timestamp of the last snapshot.
    pub updated_at: String,
}

impl From<MatchListItemEntity> for MatchListItem {
    fn from(entity: MatchListItemEntity) -> Self {
        Self {
            id: entity.id,
            teams: entity.teams,
            total_overs: entity.total_overs,
            completed: entity.completed,
            result: entity.result,
            updated_at: format_system_time(entity.updated_at),
        }
    }
}
