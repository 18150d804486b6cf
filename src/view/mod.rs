//! Pure, synchronous filters deriving UI-ready lists from live-query
//! snapshots. Nothing here performs I/O.

mod favorites;
mod home;
mod reservations;

pub use favorites::favorites;
pub use home::{categories, HomeFilter};
pub use reservations::{partition, ReservationLists};
