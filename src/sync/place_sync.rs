use tokio::sync::watch;

use crate::db::PlaceStore;
use crate::models::TouristPlace;
use crate::remote::RemoteClient;

/// Error type for place sync operations.
#[derive(Debug)]
pub enum PlaceSyncError {
    /// Local cache error
    Store(sqlx::Error),
}

impl std::fmt::Display for PlaceSyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceSyncError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for PlaceSyncError {}

impl From<sqlx::Error> for PlaceSyncError {
    fn from(e: sqlx::Error) -> Self {
        PlaceSyncError::Store(e)
    }
}

/// Repository reconciling the remote places collection with the local cache.
pub struct PlaceRepository {
    store: PlaceStore,
    remote: RemoteClient,
}

impl PlaceRepository {
    pub fn new(store: PlaceStore, remote: RemoteClient) -> Self {
        Self { store, remote }
    }

    /// Live query the UI observes. Reads always come from the local cache.
    pub fn places(&self) -> watch::Receiver<Vec<TouristPlace>> {
        self.store.subscribe()
    }

    pub async fn get(&self, id: i64) -> Result<Option<TouristPlace>, PlaceSyncError> {
        Ok(self.store.get(id).await?)
    }

    /// Pulls the remote collection and replaces every cached row by id.
    ///
    /// A failed or empty fetch leaves the cache untouched; whatever was
    /// synced last keeps being served. Returns the number of rows written.
    pub async fn sync_places(&self) -> Result<usize, PlaceSyncError> {
        let dtos = self.remote.fetch_all_places().await;
        if dtos.is_empty() {
            tracing::debug!("Place sync: nothing fetched, keeping cached data");
            return Ok(0);
        }

        let places: Vec<TouristPlace> = dtos.into_iter().map(|dto| dto.into_place()).collect();
        self.store.upsert_places(&places).await?;

        tracing::debug!("Place sync: {} row(s) replaced", places.len());
        Ok(places.len())
    }

    /// Optimistic favorite toggle.
    ///
    /// The local flag flips immediately so the UI responds with no latency,
    /// then the remote patch is attempted. A confirmed remote failure reverts
    /// the local flag, keeping both stores convergent. Returns the flag value
    /// the cache holds after reconciliation.
    pub async fn toggle_favorite(
        &self,
        id: i64,
        current_status: bool,
    ) -> Result<bool, PlaceSyncError> {
        let new_status = !current_status;
        self.store.set_favorite(id, new_status).await?;

        if let Err(e) = self.remote.set_favorite(id, new_status).await {
            tracing::warn!(
                "Favorite update for place {} failed remotely, reverting: {}",
                id,
                e
            );
            self.store.set_favorite(id, current_status).await?;
            return Ok(current_status);
        }

        Ok(new_status)
    }

    /// Bulk cache invalidation. All local writes go through the repository.
    pub async fn clear_cache(&self) -> Result<(), PlaceSyncError> {
        Ok(self.store.clear().await?)
    }
}
