//! Reconciliation between the remote document store and the local cache.
//!
//! Two repositories, one per entity kind. Both follow the same shape: reads
//! come from the local store's live query, a sync pulls remote documents and
//! replaces local rows by id, and writes apply with a defined ordering:
//!
//! - favorites are optimistic: local first, remote confirm, revert on
//!   confirmed failure
//! - reservation create/cancel gate on the remote: the local cache is only
//!   touched after the remote write succeeds, so it never shows a
//!   reservation the server does not have

pub mod place_sync;
pub mod reservation_sync;

pub use place_sync::{PlaceRepository, PlaceSyncError};
pub use reservation_sync::{ReservationRepository, ReservationSyncError};
