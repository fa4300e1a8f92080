//! Persistence contract for match snapshots.

/// In-memory store used by tests and the demo binary.
pub mod memory;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::{MatchListItemEntity, MatchSnapshotEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for match snapshots.
///
/// The engine pushes a snapshot after every applied event and reads one
/// back when resuming a match; the store is an opaque key-value mapping
/// from match id to snapshot. Database-backed implementations live in the
/// surrounding application.
pub trait MatchStore: Send + Sync {
    /// Insert or replace the snapshot for its match id.
    fn save_match(&self, snapshot: MatchSnapshotEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch a snapshot by match id.
    fn find_match(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MatchSnapshotEntity>>>;
    /// List stored matches in summary form.
    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchListItemEntity>>>;
    /// Remove a match; returns whether anything was deleted.
    fn delete_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    /// Probe backend health.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish a dropped backend connection.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
