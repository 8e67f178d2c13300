//! Modelo de Location
//!
//! Un punto geográfico que pertenece a exactamente una lista. La pertenencia
//! y el orden relativo son responsabilidad de la lista, no de la ubicación.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::utils::validation::{validate_coordinates, validate_not_empty};

/// Identificador de ubicación asignado por el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub i64);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ubicación confirmada por el servidor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub place_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Location {
    /// Coordenadas en el formato "lat,lng" que esperan los proveedores de rutas
    pub fn lat_lng(&self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Borrador de ubicación (resultado de búsqueda aún sin id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_coordinates", skip_on_field_errors = false))]
pub struct LocationDraft {
    #[validate(custom = "validate_not_empty")]
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub place_id: Option<String>,
}

impl LocationDraft {
    pub fn new(name: impl Into<String>, address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            lat,
            lng,
            place_id: None,
        }
    }

    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = Some(place_id.into());
        self
    }
}

/// Coordenadas geográficas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
