use serde::de::DeserializeOwned;
use serde_json::json;

use super::dto::{RemoteDocument, ReservationDto, TouristPlaceDto};
use crate::config::RemoteConfig;
use crate::models::{Reservation, ReservationStatus};

/// Remote collection names.
const PLACES: &str = "sitios_turisticos";
const RESERVATIONS: &str = "reservas";

/// Errors that can occur talking to the remote document store.
#[derive(Debug)]
pub enum RemoteError {
    /// Remote access is not configured
    NotConfigured,
    /// Transport-level failure (connection, timeout)
    Http(String),
    /// Server answered with a non-success status
    Status(u16),
    /// Response body did not decode
    Decode(String),
    /// No document matched the lookup
    DocumentNotFound(String),
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteError::NotConfigured => write!(
                f,
                "Remote store not configured. Add server_url and api_key to config."
            ),
            RemoteError::Http(e) => write!(f, "HTTP error: {}", e),
            RemoteError::Status(code) => write!(f, "Server returned status {}", code),
            RemoteError::Decode(e) => write!(f, "Decode error: {}", e),
            RemoteError::DocumentNotFound(what) => write!(f, "Document not found: {}", what),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Client for the remote document store holding the `sitios_turisticos` and
/// `reservas` collections.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl RemoteClient {
    /// Creates a client from config.
    ///
    /// Returns an error if remote access is not configured.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let server_url = config
            .server_url
            .clone()
            .ok_or(RemoteError::NotConfigured)?;
        let api_key = config.api_key.clone().ok_or(RemoteError::NotConfigured)?;

        Ok(Self::new(server_url, api_key))
    }

    /// Creates a client with explicit parameters.
    pub fn new(server_url: String, api_key: String) -> Self {
        Self {
            base_url: server_url.trim_end_matches('/').to_string(),
            api_key,
            http: reqwest::Client::new(),
        }
    }

    /// Downloads the whole places collection.
    ///
    /// Any failure is logged and yields an empty list; the caller keeps
    /// serving whatever it has cached.
    pub async fn fetch_all_places(&self) -> Vec<TouristPlaceDto> {
        match self.get_documents::<TouristPlaceDto>(PLACES, &[]).await {
            Ok(docs) => docs.into_iter().map(|doc| doc.fields).collect(),
            Err(e) => {
                tracing::warn!("Failed to fetch places: {}", e);
                Vec::new()
            }
        }
    }

    /// Patches the favorite flag on the document whose stored numeric `id`
    /// field matches.
    pub async fn set_favorite(&self, id: i64, is_favorite: bool) -> Result<(), RemoteError> {
        let docs: Vec<RemoteDocument<TouristPlaceDto>> = self
            .get_documents(PLACES, &[("id", id.to_string())])
            .await?;

        let doc = docs
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::DocumentNotFound(format!("place with id {}", id)))?;

        self.patch_document(PLACES, &doc.doc_id, &json!({ "isFavorite": is_favorite }))
            .await
    }

    /// Fetches the user's reservation documents, filtered server-side.
    pub async fn fetch_reservations_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<RemoteDocument<ReservationDto>>, RemoteError> {
        self.get_documents(RESERVATIONS, &[("userId", user_id.to_string())])
            .await
    }

    /// Patches the status field of a reservation document.
    pub async fn set_reservation_status(
        &self,
        id: &str,
        estado: ReservationStatus,
    ) -> Result<(), RemoteError> {
        self.patch_document(RESERVATIONS, id, &json!({ "estado": estado.to_string() }))
            .await
    }

    /// Full document write keyed by the reservation's own id.
    pub async fn put_reservation(&self, reservation: &Reservation) -> Result<(), RemoteError> {
        let body = ReservationDto::from(reservation);

        let response = self
            .http
            .put(self.document_url(RESERVATIONS, &reservation.id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().as_u16()));
        }

        Ok(())
    }

    /// Health probe. Used as the reminder worker's connectivity gate.
    pub async fn check_server(&self) -> bool {
        match self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn get_documents<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<RemoteDocument<T>>, RemoteError> {
        let response = self
            .http
            .get(self.collection_url(collection))
            .query(query)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn patch_document(
        &self,
        collection: &str,
        doc_id: &str,
        body: &serde_json::Value,
    ) -> Result<(), RemoteError> {
        let response = self
            .http
            .patch(self.document_url(collection, doc_id))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().as_u16()));
        }

        Ok(())
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/v1/{}", self.base_url, collection)
    }

    fn document_url(&self, collection: &str, doc_id: &str) -> String {
        format!("{}/v1/{}/{}", self.base_url, collection, doc_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::testutil::{place_doc, reservation_doc, FakeRemote, FakeState};
    use chrono::Utc;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = RemoteClient::new("http://localhost:8080/".to_string(), "k".to_string());
        assert_eq!(
            client.collection_url("reservas"),
            "http://localhost:8080/v1/reservas"
        );
        assert_eq!(
            client.document_url("reservas", "r1"),
            "http://localhost:8080/v1/reservas/r1"
        );
    }

    #[test]
    fn test_from_config_requires_both_values() {
        let mut config = RemoteConfig::default();
        assert!(matches!(
            RemoteClient::from_config(&config),
            Err(RemoteError::NotConfigured)
        ));

        config.server_url = Some("http://localhost:8080".to_string());
        assert!(matches!(
            RemoteClient::from_config(&config),
            Err(RemoteError::NotConfigured)
        ));

        config.api_key = Some("key".to_string());
        assert!(RemoteClient::from_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_all_places() {
        let mut state = FakeState::default();
        state.places.push(place_doc(
            "p1",
            serde_json::json!({"id": 1, "name": "Plaza de Armas", "categoria": "Histórico"}),
        ));
        state.places.push(place_doc(
            "p2",
            serde_json::json!({"id": 2, "name": "Mirador de Yanahuara"}),
        ));
        let fake = FakeRemote::start(state).await;

        let places = fake.client().fetch_all_places().await;
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Plaza de Armas");
        assert_eq!(places[0].categoria, "Histórico");
    }

    #[tokio::test]
    async fn test_fetch_all_places_swallows_server_errors() {
        let fake = FakeRemote::start(FakeState {
            fail_reads: true,
            ..FakeState::default()
        })
        .await;

        assert!(fake.client().fetch_all_places().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_places_swallows_connection_errors() {
        // Nothing listens on this port
        let client = RemoteClient::new("http://127.0.0.1:1".to_string(), "k".to_string());
        assert!(client.fetch_all_places().await.is_empty());
    }

    #[tokio::test]
    async fn test_set_favorite_patches_matching_document() {
        let mut state = FakeState::default();
        state.places.push(place_doc(
            "p9",
            serde_json::json!({"id": 9, "name": "Sabandía", "isFavorite": false}),
        ));
        let fake = FakeRemote::start(state).await;

        fake.client().set_favorite(9, true).await.unwrap();

        let state = fake.state.lock().unwrap();
        assert_eq!(state.places[0]["fields"]["isFavorite"], true);
    }

    #[tokio::test]
    async fn test_set_favorite_unknown_id_is_an_error() {
        let fake = FakeRemote::start(FakeState::default()).await;

        let result = fake.client().set_favorite(404, true).await;
        assert!(matches!(result, Err(RemoteError::DocumentNotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_reservations_filters_by_user() {
        let mut state = FakeState::default();
        state.reservations.push(reservation_doc(
            "r1",
            serde_json::json!({"placeId": 1, "userId": "user123", "estado": "Confirmada"}),
        ));
        state.reservations.push(reservation_doc(
            "r2",
            serde_json::json!({"placeId": 2, "userId": "someone-else", "estado": "Confirmada"}),
        ));
        let fake = FakeRemote::start(state).await;

        let docs = fake
            .client()
            .fetch_reservations_for_user("user123")
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].doc_id, "r1");
    }

    #[tokio::test]
    async fn test_put_reservation_stores_document() {
        let fake = FakeRemote::start(FakeState::default()).await;
        let reservation = crate::models::Reservation::new(
            3,
            "Cañón del Colca",
            "colca.jpg",
            "user123",
            Utc::now(),
            4,
            280.0,
        );

        fake.client().put_reservation(&reservation).await.unwrap();

        let state = fake.state.lock().unwrap();
        assert_eq!(state.reservations.len(), 1);
        assert_eq!(state.reservations[0]["docId"], reservation.id.as_str());
        assert_eq!(state.reservations[0]["fields"]["numPersonas"], 4);
    }

    #[tokio::test]
    async fn test_put_reservation_surfaces_failures() {
        let fake = FakeRemote::start(FakeState {
            fail_writes: true,
            ..FakeState::default()
        })
        .await;
        let reservation =
            crate::models::Reservation::new(3, "Colca", "", "user123", Utc::now(), 1, 70.0);

        let result = fake.client().put_reservation(&reservation).await;
        assert!(matches!(result, Err(RemoteError::Status(500))));
    }

    #[tokio::test]
    async fn test_set_reservation_status() {
        let mut state = FakeState::default();
        state.reservations.push(reservation_doc(
            "r1",
            serde_json::json!({"placeId": 1, "userId": "user123", "estado": "Confirmada"}),
        ));
        let fake = FakeRemote::start(state).await;

        fake.client()
            .set_reservation_status("r1", ReservationStatus::Cancelled)
            .await
            .unwrap();

        let state = fake.state.lock().unwrap();
        assert_eq!(state.reservations[0]["fields"]["estado"], "Cancelada");
    }

    #[tokio::test]
    async fn test_check_server() {
        let fake = FakeRemote::start(FakeState::default()).await;
        assert!(fake.client().check_server().await);

        let offline = RemoteClient::new("http://127.0.0.1:1".to_string(), "k".to_string());
        assert!(!offline.check_server().await);
    }
}
