//! In-memory [`MatchStore`] backed by a concurrent map.
//!
//! Fast, always healthy, and forgetful: everything is gone when the
//! process exits. The demo binary and the service tests run on it.

use dashmap::DashMap;
use futures::future::BoxFuture;
use std::sync::Arc;
use uuid::Uuid;

use crate::dao::match_store::MatchStore;
use crate::dao::models::{MatchListItemEntity, MatchSnapshotEntity};
use crate::dao::storage::StorageResult;

/// Snapshot store holding everything in process memory.
#[derive(Clone, Default)]
pub struct InMemoryMatchStore {
    matches: Arc<DashMap<Uuid, MatchSnapshotEntity>>,
}

impl InMemoryMatchStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether the store holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl MatchStore for InMemoryMatchStore {
    fn save_match(&self, snapshot: MatchSnapshotEntity) -> BoxFuture<'static, StorageResult<()>> {
        let matches = self.matches.clone();
        Box::pin(async move {
            matches.insert(snapshot.id, snapshot);
            Ok(())
        })
    }

    fn find_match(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<MatchSnapshotEntity>>> {
        let matches = self.matches.clone();
        Box::pin(async move { Ok(matches.get(&id).map(|entry| entry.value().clone())) })
    }

    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchListItemEntity>>> {
        let matches = self.matches.clone();
        Box::pin(async move {
            let mut items: Vec<MatchListItemEntity> = matches
                .iter()
                .map(|entry| MatchListItemEntity::from(entry.value()))
                .collect();
            items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(items)
        })
    }

    fn delete_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let matches = self.matches.clone();
        Box::pin(async move { Ok(matches.remove(&id).is_some()) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MatchRules, MatchState, Openers, TeamInfo};

    fn snapshot() -> MatchSnapshotEntity {
        let team = |name: &str| TeamInfo {
            name: name.into(),
            batting_order: (1..=11).map(|n| format!("{name} Batsman {n}")).collect(),
            bowling_order: (1..=6).map(|n| format!("{name} Bowler {n}")).collect(),
        };
        let state = MatchState::new(
            Uuid::new_v4(),
            [team("Lions"), team("Sharks")],
            MatchRules { total_overs: 20 },
            0,
            Openers {
                striker: "Lions Batsman 1".into(),
                non_striker: "Lions Batsman 2".into(),
                bowler: "Sharks Bowler 1".into(),
            },
        )
        .unwrap();
        MatchSnapshotEntity::capture(&state)
    }

    #[tokio::test]
    async fn save_find_delete_round_trip() {
        let store = InMemoryMatchStore::new();
        let snapshot = snapshot();
        let id = snapshot.id;

        store.save_match(snapshot.clone()).await.unwrap();
        let found = store.find_match(id).await.unwrap().unwrap();
        assert_eq!(found, snapshot);

        assert_eq!(store.list_matches().await.unwrap().len(), 1);
        assert!(store.delete_match(id).await.unwrap());
        assert!(!store.delete_match(id).await.unwrap());
        assert!(store.find_match(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_the_previous_snapshot() {
        let store = InMemoryMatchStore::new();
        let mut snapshot = snapshot();
        let id = snapshot.id;

        store.save_match(snapshot.clone()).await.unwrap();
        snapshot.completed = true;
        store.save_match(snapshot).await.unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.find_match(id).await.unwrap().unwrap().completed);
    }
}
