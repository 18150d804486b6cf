use tokio::sync::watch;

use crate::db::ReservationStore;
use crate::models::{Reservation, ReservationStatus};
use crate::remote::{RemoteClient, RemoteError};

/// Error type for reservation sync operations.
#[derive(Debug)]
pub enum ReservationSyncError {
    /// Local cache error
    Store(sqlx::Error),
    /// Remote document store error
    Remote(RemoteError),
}

impl std::fmt::Display for ReservationSyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationSyncError::Store(e) => write!(f, "Store error: {}", e),
            ReservationSyncError::Remote(e) => write!(f, "Remote error: {}", e),
        }
    }
}

impl std::error::Error for ReservationSyncError {}

impl From<sqlx::Error> for ReservationSyncError {
    fn from(e: sqlx::Error) -> Self {
        ReservationSyncError::Store(e)
    }
}

impl From<RemoteError> for ReservationSyncError {
    fn from(e: RemoteError) -> Self {
        ReservationSyncError::Remote(e)
    }
}

/// Repository reconciling the remote reservations collection with the local
/// cache.
///
/// Reservation writes gate on the remote store: a reservation is only
/// mirrored locally once the server has accepted it. A ghost local-only
/// reservation would have scheduling and payment implications, so the
/// ordering is never relaxed the way it is for favorites.
pub struct ReservationRepository {
    store: ReservationStore,
    remote: RemoteClient,
}

impl ReservationRepository {
    pub fn new(store: ReservationStore, remote: RemoteClient) -> Self {
        Self { store, remote }
    }

    /// Live query the UI observes.
    pub fn reservations(&self) -> watch::Receiver<Vec<Reservation>> {
        self.store.subscribe()
    }

    /// Pulls the user's remote reservations and replaces local rows by id.
    ///
    /// Remote failures are logged and swallowed; the cached rows keep being
    /// served. Documents with an unrecognized status are skipped rather than
    /// failing the batch. Returns the number of rows written.
    pub async fn sync_reservations(&self, user_id: &str) -> Result<usize, ReservationSyncError> {
        let docs = match self.remote.fetch_reservations_for_user(user_id).await {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!("Reservation sync failed, keeping cached data: {}", e);
                return Ok(0);
            }
        };

        let reservations: Vec<Reservation> = docs
            .into_iter()
            .filter_map(|doc| {
                let doc_id = doc.doc_id.clone();
                match doc.fields.into_reservation(doc.doc_id) {
                    Ok(reservation) => Some(reservation),
                    Err(e) => {
                        tracing::warn!("Skipping reservation document {}: {}", doc_id, e);
                        None
                    }
                }
            })
            .collect();

        if reservations.is_empty() {
            return Ok(0);
        }

        self.store.upsert_reservations(&reservations).await?;
        tracing::debug!("Reservation sync: {} row(s) replaced", reservations.len());
        Ok(reservations.len())
    }

    /// Writes the reservation to the remote store, then mirrors it locally.
    ///
    /// If the remote write fails the error propagates and the local cache is
    /// not touched.
    pub async fn create_reservation(
        &self,
        reservation: &Reservation,
    ) -> Result<(), ReservationSyncError> {
        self.remote.put_reservation(reservation).await?;
        self.store
            .upsert_reservations(std::slice::from_ref(reservation))
            .await?;
        Ok(())
    }

    /// Flips the reservation to Cancelled remotely, then locally.
    ///
    /// Same ordering guarantee as creation: remote success is a precondition
    /// for the local mutation.
    pub async fn cancel_reservation(&self, id: &str) -> Result<(), ReservationSyncError> {
        self.remote
            .set_reservation_status(id, ReservationStatus::Cancelled)
            .await?;
        self.store
            .update_status(id, ReservationStatus::Cancelled)
            .await?;
        Ok(())
    }

    /// One-shot snapshot of Confirmed reservations, for the reminder worker.
    pub async fn confirmed_reservations(&self) -> Result<Vec<Reservation>, ReservationSyncError> {
        Ok(self.store.get_confirmed().await?)
    }

    /// Bulk cache invalidation. All local writes go through the repository.
    pub async fn clear_cache(&self) -> Result<(), ReservationSyncError> {
        Ok(self.store.clear().await?)
    }
}
