//! Keeps the snapshot store healthy and drains the deferred-save queue.
//!
//! The supervisor owns the degraded flag: it connects with backoff, polls
//! backend health, retries dropped connections, and flushes snapshots whose
//! saves failed while the store was down.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{match_store::MatchStore, storage::StorageError},
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Connect to the storage backend, keep it healthy, and retry deferred
/// snapshot saves whenever the backend is reachable.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn MatchStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        match connect().await {
            Ok(store) => {
                state.install_match_store(store.clone()).await;
                info!("storage connection established; leaving degraded mode");
                delay = INITIAL_DELAY;

                loop {
                    match store.health_check().await {
                        Ok(()) => {
                            if state.is_degraded() {
                                info!("storage healthy again; leaving degraded mode");
                                state.update_degraded(false);
                            }
                            flush_deferred_saves(&state, store.as_ref()).await;
                            sleep(HEALTH_POLL_INTERVAL).await;
                        }
                        Err(_) => {
                            if !reconnect_with_backoff(&state, store.as_ref()).await {
                                warn!(
                                    "exhausted storage reconnect attempts; staying in degraded mode"
                                );
                                break;
                            }
                            state.update_degraded(false);
                            sleep(HEALTH_POLL_INTERVAL).await;
                        }
                    }
                }

                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
            Err(err) => {
                warn!(error = %err, "storage connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }
}

/// Retry every deferred snapshot once, requeueing the ones that fail.
///
/// A snapshot queued afresh while its retry is in flight wins over the
/// stale copy being retried. Returns how many snapshots were flushed.
pub async fn flush_deferred_saves(state: &SharedState, store: &dyn MatchStore) -> usize {
    let pending = state.take_deferred_saves();
    if pending.is_empty() {
        return 0;
    }

    let total = pending.len();
    let mut flushed = 0;
    for snapshot in pending {
        let match_id = snapshot.id;
        match store.save_match(snapshot.clone()).await {
            Ok(()) => flushed += 1,
            Err(err) => {
                warn!(
                    match_id = %match_id,
                    error = %err,
                    "deferred snapshot save failed again"
                );
                state.requeue_deferred_save(snapshot);
            }
        }
    }

    if flushed > 0 {
        info!(flushed, total, "flushed deferred match snapshots");
    }
    flushed
}

async fn reconnect_with_backoff(state: &SharedState, store: &dyn MatchStore) -> bool {
    let mut attempt = 0;
    let mut delay = INITIAL_DELAY;

    while attempt < MAX_RECONNECT_ATTEMPTS {
        match store.try_reconnect().await {
            Ok(()) => {
                info!("storage reconnection succeeded after health check failure");
                return true;
            }
            Err(err) => {
                if attempt == 0 {
                    warn!(
                        attempt, error = %err,
                        "storage reconnect first attempt failed; entering degraded mode"
                    );
                    state.update_degraded(true);
                } else {
                    warn!(attempt, error = %err, "storage reconnect attempt failed");
                }
                attempt += 1;
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }

    false
}
