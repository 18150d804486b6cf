use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Reservation lifecycle state. Transitions are monotonic: a Confirmed
/// reservation becomes Cancelled or Completed, never the other way around.
///
/// The wire and database representation keeps the Spanish strings used by the
/// remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[serde(rename = "Confirmada")]
    Confirmed,
    #[serde(rename = "Cancelada")]
    Cancelled,
    #[serde(rename = "Completada")]
    Completed,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Confirmed => write!(f, "Confirmada"),
            ReservationStatus::Cancelled => write!(f, "Cancelada"),
            ReservationStatus::Completed => write!(f, "Completada"),
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirmada" => Ok(ReservationStatus::Confirmed),
            "cancelada" => Ok(ReservationStatus::Cancelled),
            "completada" => Ok(ReservationStatus::Completed),
            _ => Err(format!(
                "Invalid reservation status '{}'. Valid options: Confirmada, Cancelada, Completada",
                s
            )),
        }
    }
}

/// A user's booking for a visit to a place on a given date.
///
/// The place name and image are denormalized so the reservation list renders
/// without a join against the places table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub place_id: i64,
    pub place_name: String,
    pub place_image: String,
    pub user_id: String,
    pub fecha: DateTime<Utc>,
    pub num_personas: u32,
    pub precio_total: f64,
    pub estado: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        place_id: i64,
        place_name: impl Into<String>,
        place_image: impl Into<String>,
        user_id: impl Into<String>,
        fecha: DateTime<Utc>,
        num_personas: u32,
        precio_total: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            place_id,
            place_name: place_name.into(),
            place_image: place_image.into(),
            user_id: user_id.into(),
            fecha,
            num_personas,
            precio_total,
            estado: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_status(mut self, estado: ReservationStatus) -> Self {
        self.estado = estado;
        self
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  {} persona(s)  S/ {:.2}  [{}]",
            self.fecha.format("%Y-%m-%d"),
            self.place_name,
            self.num_personas,
            self.precio_total,
            self.estado
        )
    }
}
