//! Clients - HTTP Clients for External APIs
//!
//! Este módulo contiene los contratos con los colaboradores externos
//! (API de persistencia y proveedor de optimización) y sus clientes HTTP.

pub mod directions_client;
pub mod my_list_api_client;

use async_trait::async_trait;

use crate::dto::directions_dto::{OptimizationRequest, OptimizationResult};
use crate::dto::my_list_dto::{ApiLocation, ApiMyList, UpdateListRequest};
use crate::models::{ListId, LocationDraft, LocationId};
use crate::utils::errors::AppResult;

pub use directions_client::GoogleDirectionsClient;
pub use my_list_api_client::MyListApiClient;

/// Contrato con la API de persistencia de listas
///
/// Cada método realiza exactamente un intercambio de red y devuelve la
/// representación canónica del servidor. Los fallos se reportan como
/// `AppError::Sync`; no hay reintentos automáticos.
#[async_trait]
pub trait PersistenceApi: Send + Sync {
    async fn fetch_lists(&self) -> AppResult<Vec<ApiMyList>>;

    async fn fetch_list(&self, list_id: ListId) -> AppResult<ApiMyList>;

    async fn create_list(&self, name: &str, description: &str) -> AppResult<ApiMyList>;

    async fn update_list(&self, list_id: ListId, update: &UpdateListRequest) -> AppResult<ApiMyList>;

    async fn delete_list(&self, list_id: ListId) -> AppResult<()>;

    async fn add_location(&self, list_id: ListId, draft: &LocationDraft) -> AppResult<ApiLocation>;

    async fn remove_location(&self, list_id: ListId, location_id: LocationId) -> AppResult<()>;

    async fn reorder_locations(
        &self,
        list_id: ListId,
        location_ids: &[LocationId],
    ) -> AppResult<Vec<ApiLocation>>;
}

/// Contrato con el proveedor externo de optimización de rutas
///
/// Solo reordena los waypoints; origen y destino quedan fijos. Un estado
/// distinto de éxito se reporta como `AppError::RouteComputation`.
#[async_trait]
pub trait OptimizationProvider: Send + Sync {
    async fn optimize(&self, request: &OptimizationRequest) -> AppResult<OptimizationResult>;
}
