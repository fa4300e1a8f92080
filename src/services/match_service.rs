//! Business logic for bringing matches to life: creation with toss and
//! roster resolution, loading persisted matches back into the registry,
//! listings, and deletion.

use std::collections::HashSet;

use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::MatchSnapshotEntity,
    dto::setup::{MatchListItem, MatchSummary, NewMatchRequest, TeamSetupInput},
    engine::{MatchRules, MatchState, Openers, RosterProvider, TeamInfo, roster},
    error::ServiceError,
    services::scoring_service,
    state::SharedState,
};
use validator::Validate;

/// Bootstrap a fresh live match.
///
/// The toss is rolled when the request does not pin the side batting
/// first; rosters come from the request, then the provider, then the
/// synthetic fallback. The initial snapshot is pushed to the store (or
/// deferred when storage is down) before the summary is returned.
pub async fn create_match(
    state: &SharedState,
    request: NewMatchRequest,
    provider: &dyn RosterProvider,
) -> Result<MatchSummary, ServiceError> {
    request.validate()?;

    let NewMatchRequest {
        teams,
        total_overs,
        batting_first,
        openers,
    } = request;

    let mut teams = teams.into_iter();
    let (Some(team_one), Some(team_two)) = (teams.next(), teams.next()) else {
        return Err(ServiceError::InvalidInput(
            "a match needs exactly two teams".into(),
        ));
    };
    if team_one.name.trim() == team_two.name.trim() {
        return Err(ServiceError::InvalidInput(format!(
            "both teams are named `{}`",
            team_one.name.trim()
        )));
    }

    let team_one = resolve_side(provider, team_one)?;
    let team_two = resolve_side(provider, team_two)?;

    let batting_first = match batting_first {
        Some(index) => usize::from(index),
        None => toss(&team_one, &team_two),
    };
    let total_overs = total_overs.unwrap_or(state.config().default_total_overs);

    let sides = [team_one, team_two];
    let fielding = 1 - batting_first;
    let openers = match openers {
        Some(input) => Openers {
            striker: input.striker,
            non_striker: input.non_striker,
            bowler: input.bowler,
        },
        None => Openers {
            striker: sides[batting_first].batting_order[0].clone(),
            non_striker: sides[batting_first].batting_order[1].clone(),
            bowler: sides[fielding].bowling_order[0].clone(),
        },
    };

    let live = MatchState::new(
        Uuid::new_v4(),
        sides,
        MatchRules { total_overs },
        batting_first,
        openers,
    )?;

    info!(
        match_id = %live.id,
        team_one = %live.teams[0].name,
        team_two = %live.teams[1].name,
        batting_first = %live.teams[batting_first].name,
        total_overs,
        "match is live"
    );

    let snapshot = MatchSnapshotEntity::capture(&live);
    let summary = MatchSummary::from(&live);
    state.register_match(live);
    scoring_service::persist_snapshot(state, snapshot).await;

    Ok(summary)
}

/// Load a persisted match back into the live registry, resuming scoring
/// from its last snapshot.
pub async fn load_match(state: &SharedState, id: Uuid) -> Result<MatchSummary, ServiceError> {
    if state.live_match(id).is_some() {
        return Err(ServiceError::InvalidState(format!(
            "match `{id}` is already live"
        )));
    }

    let store = state.require_match_store().await?;
    let Some(snapshot) = store.find_match(id).await? else {
        return Err(ServiceError::NotFound(format!("match `{id}` not found")));
    };

    validate_persisted_match(&snapshot)?;

    let live: MatchState = snapshot.into();
    let summary = MatchSummary::from(&live);
    state.register_match(live);

    info!(match_id = %id, "match resumed from its stored snapshot");
    Ok(summary)
}

/// Matches persisted in storage, newest first.
pub async fn list_matches(state: &SharedState) -> Result<Vec<MatchListItem>, ServiceError> {
    let store = state.require_match_store().await?;
    let items = store.list_matches().await?;
    Ok(items.into_iter().map(Into::into).collect())
}

/// Delete a stored match. A live, unfinished match cannot be deleted.
pub async fn delete_match(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    if let Some(handle) = state.live_match(id) {
        let completed = handle.lock().await.completed;
        if !completed {
            return Err(ServiceError::InvalidState(
                "cannot delete a match that is currently live".into(),
            ));
        }
        state.unregister_match(id);
    }

    let store = state.require_match_store().await?;
    if !store.delete_match(id).await? {
        return Err(ServiceError::NotFound(format!("match `{id}` not found")));
    }
    Ok(())
}

/// Roll the toss: the winning side chooses to bat.
fn toss(team_one: &TeamInfo, team_two: &TeamInfo) -> usize {
    let batting_first = usize::from(!rand::rng().random_bool(0.5));
    let winner = if batting_first == 0 { team_one } else { team_two };
    info!(winner = %winner.name, "toss decided");
    batting_first
}

/// Resolve one side's rosters: the request wins, then the provider, then
/// the synthetic placeholder names.
fn resolve_side(
    provider: &dyn RosterProvider,
    input: TeamSetupInput,
) -> Result<TeamInfo, ServiceError> {
    let name = input.name.trim().to_string();
    let mut team = roster::resolve_team(provider, &name);
    if !input.players.is_empty() {
        team.batting_order = input.players;
    }
    if !input.bowlers.is_empty() {
        team.bowling_order = input.bowlers;
    }

    if team.batting_order.len() < 2 {
        return Err(ServiceError::InvalidInput(format!(
            "team `{name}` needs at least two batters"
        )));
    }
    if team.bowling_order.is_empty() {
        return Err(ServiceError::InvalidInput(format!(
            "team `{name}` needs at least one bowler"
        )));
    }

    // Batting and bowling lists may overlap (all-rounders), but a name may
    // not repeat within either list.
    for list in [&team.batting_order, &team.bowling_order] {
        let mut seen = HashSet::new();
        for player in list {
            if player.trim().is_empty() {
                return Err(ServiceError::InvalidInput(format!(
                    "team `{name}` has a blank player name"
                )));
            }
            if !seen.insert(player.as_str()) {
                return Err(ServiceError::InvalidInput(format!(
                    "duplicate player `{player}` detected in team `{name}`"
                )));
            }
        }
    }

    Ok(team)
}

fn validate_persisted_match(snapshot: &MatchSnapshotEntity) -> Result<(), ServiceError> {
    if snapshot.batting_first > 1 {
        return Err(ServiceError::InvalidState(format!(
            "match `{}` has a corrupt batting order marker",
            snapshot.id
        )));
    }
    if snapshot.total_overs == 0 {
        return Err(ServiceError::InvalidState(format!(
            "match `{}` has no overs to play",
            snapshot.id
        )));
    }
    for team in &snapshot.teams {
        if team.batting_order.len() < 2 || team.bowling_order.is_empty() {
            return Err(ServiceError::InvalidState(format!(
                "match `{}` team `{}` has an unusable roster",
                snapshot.id, team.name
            )));
        }
    }
    for innings in &snapshot.innings {
        if innings.batting_team > 1 {
            return Err(ServiceError::InvalidState(format!(
                "match `{}` innings references an unknown team",
                snapshot.id
            )));
        }
        if innings.wickets > 10 {
            return Err(ServiceError::InvalidState(format!(
                "match `{}` records more than ten wickets in an innings",
                snapshot.id
            )));
        }
    }
    if snapshot.innings[0].batting_team == snapshot.innings[1].batting_team {
        return Err(ServiceError::InvalidState(format!(
            "match `{}` has both innings batted by the same team",
            snapshot.id
        )));
    }
    Ok(())
}
