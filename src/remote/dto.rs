use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::models::{Reservation, ReservationStatus, TouristPlace};

/// A document as returned by the remote store: server-assigned document id
/// plus the schema-on-read fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDocument<T> {
    #[serde(rename = "docId")]
    pub doc_id: String,
    pub fields: T,
}

/// Mirror of a place document. Every field carries a default so that partial
/// documents deserialize instead of failing the whole batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TouristPlaceDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub precio: f64,
    pub categoria: String,
    pub imagen: String,
    pub rating: f64,
    pub is_favorite: bool,
    pub location: HashMap<String, f64>,
    pub transport_info: String,
    pub local_tips: Vec<String>,
    pub services: HashMap<String, bool>,
}

impl TouristPlaceDto {
    pub fn into_place(self) -> TouristPlace {
        TouristPlace {
            id: self.id,
            name: self.name,
            description: self.description,
            precio: self.precio,
            categoria: self.categoria,
            imagen: self.imagen,
            rating: self.rating,
            is_favorite: self.is_favorite,
            location: self.location,
            transport_info: self.transport_info,
            local_tips: self.local_tips,
            services: self.services,
        }
    }
}

/// Mirror of a reservation document. The document id is not part of the
/// fields; it arrives as the document name and is injected on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReservationDto {
    pub place_id: i64,
    pub place_name: String,
    pub place_image: String,
    pub user_id: String,
    /// May be absent if the document was written without a date.
    pub fecha: Option<DateTime<Utc>>,
    pub num_personas: u32,
    pub precio_total: f64,
    pub estado: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for ReservationDto {
    fn default() -> Self {
        Self {
            place_id: 0,
            place_name: String::new(),
            place_image: String::new(),
            user_id: String::new(),
            fecha: None,
            num_personas: 1,
            precio_total: 0.0,
            estado: ReservationStatus::Confirmed.to_string(),
            created_at: None,
        }
    }
}

impl ReservationDto {
    /// Converts to a local row, injecting the document id.
    ///
    /// Missing dates default to now so one bad document never fails a sync
    /// batch. An unrecognized status is an error; the caller decides whether
    /// to skip the document.
    pub fn into_reservation(self, doc_id: String) -> Result<Reservation, String> {
        let estado = ReservationStatus::from_str(&self.estado)?;
        Ok(Reservation {
            id: doc_id,
            place_id: self.place_id,
            place_name: self.place_name,
            place_image: self.place_image,
            user_id: self.user_id,
            fecha: self.fecha.unwrap_or_else(Utc::now),
            num_personas: self.num_personas.max(1),
            precio_total: self.precio_total,
            estado,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

impl From<&Reservation> for ReservationDto {
    fn from(reservation: &Reservation) -> Self {
        Self {
            place_id: reservation.place_id,
            place_name: reservation.place_name.clone(),
            place_image: reservation.place_image.clone(),
            user_id: reservation.user_id.clone(),
            fecha: Some(reservation.fecha),
            num_personas: reservation.num_personas,
            precio_total: reservation.precio_total,
            estado: reservation.estado.to_string(),
            created_at: Some(reservation.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_dto_deserializes_partial_document() {
        let dto: TouristPlaceDto =
            serde_json::from_str(r#"{"id": 7, "name": "Plaza de Armas"}"#).unwrap();

        assert_eq!(dto.id, 7);
        assert_eq!(dto.name, "Plaza de Armas");
        assert_eq!(dto.precio, 0.0);
        assert!(dto.local_tips.is_empty());
    }

    #[test]
    fn test_place_dto_wire_names_are_camel_case() {
        let json = r#"{
            "id": 1,
            "name": "Mirador",
            "isFavorite": true,
            "transportInfo": "Combi azul en Av. Ejército",
            "localTips": ["Mejor ir de mañana"]
        }"#;
        let dto: TouristPlaceDto = serde_json::from_str(json).unwrap();

        assert!(dto.is_favorite);
        assert_eq!(dto.transport_info, "Combi azul en Av. Ejército");
        assert_eq!(dto.local_tips.len(), 1);
    }

    #[test]
    fn test_reservation_dto_defaults_missing_dates_to_now() {
        let dto: ReservationDto = serde_json::from_str(
            r#"{"placeId": 3, "placeName": "Colca", "userId": "user123", "estado": "Confirmada"}"#,
        )
        .unwrap();

        let before = Utc::now();
        let reservation = dto.into_reservation("doc-1".to_string()).unwrap();

        assert_eq!(reservation.id, "doc-1");
        assert!(reservation.fecha >= before);
        assert!(reservation.created_at >= before);
        assert_eq!(reservation.num_personas, 1);
    }

    #[test]
    fn test_reservation_dto_rejects_unknown_status() {
        let dto: ReservationDto =
            serde_json::from_str(r#"{"placeId": 3, "estado": "Pendiente"}"#).unwrap();

        assert!(dto.into_reservation("doc-1".to_string()).is_err());
    }

    #[test]
    fn test_reservation_wire_roundtrip() {
        let reservation = Reservation::new(
            5,
            "Monasterio de Santa Catalina",
            "santa_catalina.jpg",
            "user123",
            Utc::now(),
            2,
            80.0,
        );

        let dto = ReservationDto::from(&reservation);
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"estado\":\"Confirmada\""));
        assert!(json.contains("\"numPersonas\":2"));

        let parsed: ReservationDto = serde_json::from_str(&json).unwrap();
        let back = parsed.into_reservation(reservation.id.clone()).unwrap();
        assert_eq!(back, reservation);
    }
}
