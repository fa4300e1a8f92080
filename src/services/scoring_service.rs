//! Applying scoring events to live matches: per-match serialization,
//! snapshot persistence after every transition, feed broadcasting, and
//! idempotent completion handling.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dao::models::MatchSnapshotEntity,
    dto::score::{ScoreUpdatePayload, ScorecardView},
    engine::{EngineEvent, MatchState, PendingSelection, ScoringEvent},
    error::ServiceError,
    services::feed_events,
    state::SharedState,
};

/// What an accepted scoring event produced.
#[derive(Debug, Clone)]
pub struct EventOutcome {
    /// Derived engine notifications, in emission order.
    pub events: Vec<EngineEvent>,
    /// The payload broadcast to presentation subscribers.
    pub payload: ScoreUpdatePayload,
    /// Selection gate left open by the event, if any.
    pub pending: PendingSelection,
    /// Whether the match is now over.
    pub completed: bool,
    /// Result line once the match is over.
    pub result: Option<String>,
}

/// Apply one scoring event to a live match.
///
/// The match's own lock is held across the rule transition and the
/// snapshot push, so events for one match are strictly sequential. A
/// failed save is deferred, never rolled back: the in-memory state stays
/// authoritative.
pub async fn apply_event(
    state: &SharedState,
    match_id: Uuid,
    event: ScoringEvent,
) -> Result<EventOutcome, ServiceError> {
    let handle = state.live_match(match_id).ok_or_else(|| {
        ServiceError::NotFound(format!("match `{match_id}` is not live"))
    })?;

    let mut live = handle.lock().await;
    let events = live.apply(&event)?;
    let finished_now = live.mark_result_processed();

    let snapshot = MatchSnapshotEntity::capture(&live);
    let payload = ScoreUpdatePayload::from_state(&live, state.config().commentary_window);
    let outcome = EventOutcome {
        events: events.clone(),
        payload: payload.clone(),
        pending: live.pending,
        completed: live.completed,
        result: live.result.as_ref().map(ToString::to_string),
    };

    for engine_event in &events {
        match engine_event {
            EngineEvent::OverCompleted { over, bowler } => {
                debug!(match_id = %match_id, over, bowler = %bowler, "over complete");
            }
            EngineEvent::InningsCompleted { inning } => {
                info!(match_id = %match_id, inning = inning.number(), "innings complete");
            }
            EngineEvent::TargetSet { target } => {
                info!(match_id = %match_id, target, "chase target set");
            }
            EngineEvent::MatchCompleted { result } => {
                info!(match_id = %match_id, result = %result, "match complete");
            }
        }
    }

    // Still under the match lock: snapshots and feed events leave in the
    // same order the transitions were applied.
    persist_snapshot(state, snapshot).await;
    feed_events::broadcast_score_update(state, match_id, payload);
    if finished_now {
        if let Some(result) = &outcome.result {
            feed_events::broadcast_match_completed(state, match_id, result.clone());
        }
    }
    drop(live);

    Ok(outcome)
}

/// Read-only scorecard for a live or stored match.
pub async fn scorecard(state: &SharedState, match_id: Uuid) -> Result<ScorecardView, ServiceError> {
    if let Some(handle) = state.live_match(match_id) {
        let live = handle.lock().await;
        return Ok(ScorecardView::from(&*live));
    }

    let store = state.require_match_store().await?;
    let Some(snapshot) = store.find_match(match_id).await? else {
        return Err(ServiceError::NotFound(format!(
            "match `{match_id}` not found"
        )));
    };
    let restored: MatchState = snapshot.into();
    Ok(ScorecardView::from(&restored))
}

/// Current score payload for a live match without applying anything.
pub async fn score(state: &SharedState, match_id: Uuid) -> Result<ScoreUpdatePayload, ServiceError> {
    let handle = state.live_match(match_id).ok_or_else(|| {
        ServiceError::NotFound(format!("match `{match_id}` is not live"))
    })?;
    let live = handle.lock().await;
    Ok(ScoreUpdatePayload::from_state(
        &live,
        state.config().commentary_window,
    ))
}

/// Push a snapshot to the store, deferring it for the supervisor to retry
/// when the store is missing or the save fails.
pub(crate) async fn persist_snapshot(state: &SharedState, snapshot: MatchSnapshotEntity) {
    let match_id = snapshot.id;
    match state.match_store().await {
        None => {
            debug!(match_id = %match_id, "no store installed; snapshot deferred");
            state.queue_deferred_save(snapshot);
        }
        Some(store) => {
            if let Err(err) = store.save_match(snapshot.clone()).await {
                warn!(
                    match_id = %match_id,
                    error = %err,
                    "snapshot save failed; deferred for retry"
                );
                state.queue_deferred_save(snapshot);
            }
        }
    }
}
