//! DTOs para la API de direcciones (optimización de waypoints)
//!
//! Este módulo define las estructuras de datos para interactuar con
//! el proveedor externo de rutas y el contrato interno que consume el
//! optimizador.

use serde::{Deserialize, Serialize};

use crate::models::LatLng;

/// Request interno hacia el proveedor de optimización
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRequest {
    pub origin: LatLng,
    pub destination: LatLng,
    pub waypoints: Vec<LatLng>,
    pub travel_mode: String,
}

/// Resultado interno del proveedor, en unidades base (metros, segundos)
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    pub waypoint_order: Vec<usize>,
    pub legs: Vec<ProviderLeg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderLeg {
    pub distance: u64,
    pub duration: u64,
}

/// Response de la Directions API
#[derive(Debug, Deserialize, Serialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

/// Ruta en la respuesta
#[derive(Debug, Deserialize, Serialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub waypoint_order: Vec<usize>,
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

/// Tramo en la respuesta
#[derive(Debug, Deserialize, Serialize)]
pub struct DirectionsLeg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TextValue>,
}

/// Par texto/valor (el valor en unidades base)
#[derive(Debug, Deserialize, Serialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    pub value: u64,
}

impl From<DirectionsLeg> for ProviderLeg {
    fn from(leg: DirectionsLeg) -> Self {
        Self {
            distance: leg.distance.map(|d| d.value).unwrap_or(0),
            duration: leg.duration.map(|d| d.value).unwrap_or(0),
        }
    }
}
