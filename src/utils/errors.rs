//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del núcleo de listas y rutas
//! y su conversión a respuestas HTTP apropiadas para el servicio de persistencia.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

use crate::models::{ListId, LocationId};

/// Intención de la operación remota que falló
#[derive(Debug, Clone, PartialEq)]
pub enum SyncIntent {
    FetchLists,
    FetchList { list_id: ListId },
    CreateList { name: String },
    UpdateList { list_id: ListId },
    DeleteList { list_id: ListId },
    AddLocation { list_id: ListId, name: String },
    RemoveLocation { list_id: ListId, location_id: LocationId },
    ReorderLocations { list_id: ListId },
}

impl fmt::Display for SyncIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncIntent::FetchLists => write!(f, "fetch lists"),
            SyncIntent::FetchList { list_id } => write!(f, "fetch list {}", list_id),
            SyncIntent::CreateList { name } => write!(f, "create list '{}'", name),
            SyncIntent::UpdateList { list_id } => write!(f, "update list {}", list_id),
            SyncIntent::DeleteList { list_id } => write!(f, "delete list {}", list_id),
            SyncIntent::AddLocation { list_id, name } => {
                write!(f, "add location '{}' to list {}", name, list_id)
            }
            SyncIntent::RemoveLocation { list_id, location_id } => {
                write!(f, "remove location {} from list {}", location_id, list_id)
            }
            SyncIntent::ReorderLocations { list_id } => {
                write!(f, "reorder locations of list {}", list_id)
            }
        }
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Sync error ({intent}): {message}")]
    Sync {
        intent: SyncIntent,
        status: Option<u16>,
        message: String,
    },

    #[error("Route computation error: {0}")]
    RouteComputation(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl AppError {
    /// Código estable para clientes de la API
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Sync { .. } => "SYNC_ERROR",
            AppError::RouteComputation(_) => "ROUTE_COMPUTATION_ERROR",
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code().to_string();
        let (status, error_response) = match self {
            AppError::Validation(msg) => {
                tracing::warn!("⚠️ Validation error: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: msg,
                        details: None,
                        code,
                    },
                )
            }

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code,
                },
            ),

            AppError::Sync { intent, status, message } => {
                tracing::error!("❌ Sync error ({}): {}", intent, message);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Sync Error".to_string(),
                        message: format!("Failed to {}", intent),
                        details: Some(json!({ "upstream_status": status, "sync_error": message })),
                        code,
                    },
                )
            }

            AppError::RouteComputation(msg) => {
                tracing::error!("❌ Route computation error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Route Computation Error".to_string(),
                        message: msg,
                        details: None,
                        code,
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(message: impl Into<String>) -> AppError {
    AppError::Validation(message.into())
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: impl fmt::Display) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de sincronización
pub fn sync_error(intent: SyncIntent, status: Option<u16>, message: impl Into<String>) -> AppError {
    AppError::Sync {
        intent,
        status,
        message: message.into(),
    }
}

/// Función helper para crear errores de cálculo de ruta
pub fn route_error(message: impl Into<String>) -> AppError {
    AppError::RouteComputation(message.into())
}
