use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::models::TouristPlace;

/// Typed access to the `tourist_places` cache table.
///
/// All writes are replace-on-conflict by primary key. Every committed write
/// refreshes a watch channel so subscribers observe the new table snapshot;
/// the sync repository is the only writer.
#[derive(Clone)]
pub struct PlaceStore {
    pool: SqlitePool,
    changes: watch::Sender<Vec<TouristPlace>>,
}

#[derive(sqlx::FromRow)]
struct PlaceRow {
    id: i64,
    name: String,
    description: String,
    precio: f64,
    categoria: String,
    imagen: String,
    rating: f64,
    is_favorite: bool,
    location: String,
    transport_info: String,
    local_tips: String,
    services: String,
}

impl PlaceRow {
    fn into_place(self) -> TouristPlace {
        TouristPlace {
            id: self.id,
            name: self.name,
            description: self.description,
            precio: self.precio,
            categoria: self.categoria,
            imagen: self.imagen,
            rating: self.rating,
            is_favorite: self.is_favorite,
            location: serde_json::from_str(&self.location).unwrap_or_default(),
            transport_info: self.transport_info,
            local_tips: serde_json::from_str(&self.local_tips).unwrap_or_default(),
            services: serde_json::from_str(&self.services).unwrap_or_default(),
        }
    }
}

impl PlaceStore {
    /// Opens the store and primes the live query with the current table state.
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        let (changes, _) = watch::channel(Vec::new());
        let store = Self { pool, changes };
        store.refresh().await?;
        Ok(store)
    }

    /// Live query over the full table. The receiver holds the latest snapshot
    /// and is notified after every committed write, in commit order.
    pub fn subscribe(&self) -> watch::Receiver<Vec<TouristPlace>> {
        self.changes.subscribe()
    }

    /// Inserts places, replacing any existing row with the same id.
    pub async fn upsert_places(&self, places: &[TouristPlace]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for place in places {
            let location =
                serde_json::to_string(&place.location).unwrap_or_else(|_| "{}".to_string());
            let local_tips =
                serde_json::to_string(&place.local_tips).unwrap_or_else(|_| "[]".to_string());
            let services =
                serde_json::to_string(&place.services).unwrap_or_else(|_| "{}".to_string());

            sqlx::query(
                r#"
                INSERT OR REPLACE INTO tourist_places
                    (id, name, description, precio, categoria, imagen, rating, is_favorite, location, transport_info, local_tips, services)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(place.id)
            .bind(&place.name)
            .bind(&place.description)
            .bind(place.precio)
            .bind(&place.categoria)
            .bind(&place.imagen)
            .bind(place.rating)
            .bind(place.is_favorite)
            .bind(&location)
            .bind(&place.transport_info)
            .bind(&local_tips)
            .bind(&services)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        self.refresh().await
    }

    /// Updates only the favorite flag.
    pub async fn set_favorite(&self, id: i64, is_favorite: bool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE tourist_places SET is_favorite = ? WHERE id = ?")
            .bind(is_favorite)
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.refresh().await
    }

    pub async fn get(&self, id: i64) -> Result<Option<TouristPlace>, sqlx::Error> {
        let row: Option<PlaceRow> = sqlx::query_as("SELECT * FROM tourist_places WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PlaceRow::into_place))
    }

    pub async fn list(&self) -> Result<Vec<TouristPlace>, sqlx::Error> {
        let rows: Vec<PlaceRow> = sqlx::query_as("SELECT * FROM tourist_places ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PlaceRow::into_place).collect())
    }

    /// Bulk cache invalidation.
    pub async fn clear(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM tourist_places")
            .execute(&self.pool)
            .await?;
        self.refresh().await
    }

    async fn refresh(&self) -> Result<(), sqlx::Error> {
        let places = self.list().await?;
        self.changes.send_replace(places);
        Ok(())
    }
}
