//! DTOs para la API de persistencia de listas
//!
//! Estructuras de datos tal como viajan por HTTP entre el adaptador de
//! sincronización y el servicio de persistencia.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{ListId, Location, LocationDraft, LocationId, MyList};

/// Ubicación tal como la devuelve el servidor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiLocation {
    pub id: i64,
    pub my_list_id: i64,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub place_id: Option<String>,
    pub order_index: i32,
    #[serde(deserialize_with = "deserialize_server_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Lista tal como la devuelve el servidor (con ubicaciones anidadas)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMyList {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_server_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_server_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub locations: Vec<ApiLocation>,
}

// Request para crear una lista
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// Request para actualizar metadatos de una lista
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// Request para agregar una ubicación
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLocationRequest {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub place_id: Option<String>,
}

// Request para reordenar ubicaciones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderLocationsRequest {
    pub location_ids: Vec<i64>,
}

impl From<ApiLocation> for Location {
    fn from(api: ApiLocation) -> Self {
        Self {
            id: LocationId(api.id),
            name: api.name,
            address: api.address,
            lat: api.lat,
            lng: api.lng,
            place_id: api.place_id,
            created_at: api.created_at,
        }
    }
}

impl From<ApiMyList> for MyList {
    fn from(api: ApiMyList) -> Self {
        Self {
            id: ListId(api.id),
            name: api.name,
            description: api.description,
            locations: locations_in_order(api.locations),
            created_at: api.created_at,
            updated_at: api.updated_at,
        }
    }
}

impl From<&LocationDraft> for AddLocationRequest {
    fn from(draft: &LocationDraft) -> Self {
        Self {
            name: draft.name.clone(),
            address: draft.address.clone(),
            lat: draft.lat,
            lng: draft.lng,
            place_id: draft.place_id.clone(),
        }
    }
}

/// Convertir ubicaciones del servidor ordenándolas por `order_index`
pub fn locations_in_order(mut locations: Vec<ApiLocation>) -> Vec<Location> {
    locations.sort_by_key(|loc| loc.order_index);
    locations.into_iter().map(Location::from).collect()
}

/// Acepta RFC 3339 o ISO-8601 sin zona horaria (interpretado como UTC)
pub fn deserialize_server_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_server_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_server_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
}
