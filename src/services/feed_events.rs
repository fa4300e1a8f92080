//! Helpers that push scoring events onto the score feed.

use tracing::debug;
use uuid::Uuid;

use crate::{
    dto::score::ScoreUpdatePayload,
    state::{FeedEvent, SharedState},
};

/// Broadcast a fresh score payload for a match.
pub fn broadcast_score_update(state: &SharedState, match_id: Uuid, payload: ScoreUpdatePayload) {
    debug!(
        match_id = %match_id,
        team1 = payload.team1_score.runs,
        team2 = payload.team2_score.runs,
        "broadcasting score update"
    );
    state
        .feed()
        .broadcast(FeedEvent::ScoreUpdate { match_id, payload });
}

/// Broadcast that a match has reached its result.
pub fn broadcast_match_completed(state: &SharedState, match_id: Uuid, result: String) {
    debug!(match_id = %match_id, result = %result, "broadcasting match completion");
    state
        .feed()
        .broadcast(FeedEvent::MatchCompleted { match_id, result });
}
