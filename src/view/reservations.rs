use crate::models::{Reservation, ReservationStatus};

/// The reservations screen split: upcoming bookings versus everything else.
#[derive(Debug, Clone, Default)]
pub struct ReservationLists {
    /// Status Confirmed, soonest first
    pub upcoming: Vec<Reservation>,
    /// Cancelled and Completed, soonest first
    pub history: Vec<Reservation>,
}

/// Partitions a snapshot into upcoming and history, each sorted by scheduled
/// date ascending.
pub fn partition(reservations: &[Reservation]) -> ReservationLists {
    let mut lists = ReservationLists::default();

    for reservation in reservations {
        if reservation.estado == ReservationStatus::Confirmed {
            lists.upcoming.push(reservation.clone());
        } else {
            lists.history.push(reservation.clone());
        }
    }

    lists.upcoming.sort_by_key(|r| r.fecha);
    lists.history.sort_by_key(|r| r.fecha);
    lists
}
