mod place;
mod reservation;

pub use place::TouristPlace;
pub use reservation::{Reservation, ReservationStatus};
