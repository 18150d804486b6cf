use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::str::FromStr;
use tokio::sync::watch;

use crate::models::{Reservation, ReservationStatus};

/// Typed access to the `reservations` cache table.
///
/// Same contract as [`super::PlaceStore`]: replace-on-conflict writes, a watch
/// channel refreshed after every commit, sync repository as sole writer.
#[derive(Clone)]
pub struct ReservationStore {
    pool: SqlitePool,
    changes: watch::Sender<Vec<Reservation>>,
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: String,
    place_id: i64,
    place_name: String,
    place_image: String,
    user_id: String,
    fecha: String,
    num_personas: i64,
    precio_total: f64,
    estado: String,
    created_at: String,
}

impl ReservationRow {
    fn into_reservation(self) -> Reservation {
        Reservation {
            id: self.id,
            place_id: self.place_id,
            place_name: self.place_name,
            place_image: self.place_image,
            user_id: self.user_id,
            fecha: parse_timestamp(&self.fecha),
            num_personas: self.num_personas.max(1) as u32,
            precio_total: self.precio_total,
            estado: ReservationStatus::from_str(&self.estado)
                .unwrap_or(ReservationStatus::Confirmed),
            created_at: parse_timestamp(&self.created_at),
        }
    }
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl ReservationStore {
    /// Opens the store and primes the live query with the current table state.
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        let (changes, _) = watch::channel(Vec::new());
        let store = Self { pool, changes };
        store.refresh().await?;
        Ok(store)
    }

    /// Live query over the full table, ordered by scheduled date.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Reservation>> {
        self.changes.subscribe()
    }

    /// Inserts reservations, replacing any existing row with the same id.
    pub async fn upsert_reservations(
        &self,
        reservations: &[Reservation],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for reservation in reservations {
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO reservations
                    (id, place_id, place_name, place_image, user_id, fecha, num_personas, precio_total, estado, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&reservation.id)
            .bind(reservation.place_id)
            .bind(&reservation.place_name)
            .bind(&reservation.place_image)
            .bind(&reservation.user_id)
            .bind(reservation.fecha.to_rfc3339())
            .bind(reservation.num_personas as i64)
            .bind(reservation.precio_total)
            .bind(reservation.estado.to_string())
            .bind(reservation.created_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        self.refresh().await
    }

    /// Updates only the status column.
    pub async fn update_status(
        &self,
        id: &str,
        estado: ReservationStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE reservations SET estado = ? WHERE id = ?")
            .bind(estado.to_string())
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.refresh().await
    }

    /// One-shot snapshot for the reminder worker.
    pub async fn get_confirmed(&self) -> Result<Vec<Reservation>, sqlx::Error> {
        let rows: Vec<ReservationRow> =
            sqlx::query_as("SELECT * FROM reservations WHERE estado = ? ORDER BY fecha")
                .bind(ReservationStatus::Confirmed.to_string())
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(ReservationRow::into_reservation).collect())
    }

    pub async fn list(&self) -> Result<Vec<Reservation>, sqlx::Error> {
        let rows: Vec<ReservationRow> =
            sqlx::query_as("SELECT * FROM reservations ORDER BY fecha")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(ReservationRow::into_reservation).collect())
    }

    /// Bulk cache invalidation.
    pub async fn clear(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM reservations")
            .execute(&self.pool)
            .await?;
        self.refresh().await
    }

    async fn refresh(&self) -> Result<(), sqlx::Error> {
        let reservations = self.list().await?;
        self.changes.send_replace(reservations);
        Ok(())
    }
}
