//! Client for the remote document store.
//!
//! The remote store is the source of truth for both collections; the local
//! SQLite tables are a disposable cache rebuilt from it. Documents are
//! schema-on-read: DTOs default every missing field instead of failing.

mod client;
mod dto;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::{RemoteClient, RemoteError};
pub use dto::{RemoteDocument, ReservationDto, TouristPlaceDto};
