//! Cliente HTTP para la API de persistencia de listas
//!
//! Adaptador de sincronización remota: traduce cada operación del store
//! a una llamada HTTP y devuelve los objetos canónicos del servidor.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::PersistenceApi;
use crate::dto::my_list_dto::{
    AddLocationRequest, ApiLocation, ApiMyList, CreateListRequest, ReorderLocationsRequest,
    UpdateListRequest,
};
use crate::models::{ListId, LocationDraft, LocationId};
use crate::utils::errors::{sync_error, AppResult, SyncIntent};

/// Cliente HTTP para la API de listas
#[derive(Clone)]
pub struct MyListApiClient {
    client: Client,
    base_url: String,
}

impl MyListApiClient {
    /// Crear nuevo cliente con URL base configurable (p.ej. `http://host/api/v1`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Enviar request y parsear el cuerpo JSON de la respuesta
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        intent: SyncIntent,
    ) -> AppResult<T> {
        let response = self.send(request, &intent).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| sync_error(intent, None, format!("invalid response body: {}", e)))
    }

    /// Enviar request cuya respuesta no tiene cuerpo útil
    async fn send_empty(&self, request: RequestBuilder, intent: SyncIntent) -> AppResult<()> {
        self.send(request, &intent).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, intent: &SyncIntent) -> AppResult<reqwest::Response> {
        log::debug!("📤 Sync: {}", intent);

        let response = request
            .send()
            .await
            .map_err(|e| sync_error(intent.clone(), None, format!("transport error: {}", e)))?;

        let status = response.status();
        log::debug!("📡 Sync response status: {} ({})", status, intent);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("⚠️ Sync falló ({}): HTTP {} {}", intent, status, body);
            return Err(sync_error(
                intent.clone(),
                Some(status.as_u16()),
                format!("HTTP {}: {}", status, body),
            ));
        }

        Ok(response)
    }
}

#[async_trait]
impl PersistenceApi for MyListApiClient {
    async fn fetch_lists(&self) -> AppResult<Vec<ApiMyList>> {
        let request = self.client.get(self.url("/lists"));
        self.send_json(request, SyncIntent::FetchLists).await
    }

    async fn fetch_list(&self, list_id: ListId) -> AppResult<ApiMyList> {
        let request = self.client.get(self.url(&format!("/lists/{}", list_id)));
        self.send_json(request, SyncIntent::FetchList { list_id }).await
    }

    async fn create_list(&self, name: &str, description: &str) -> AppResult<ApiMyList> {
        let body = CreateListRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        let request = self.client.post(self.url("/lists")).json(&body);
        self.send_json(request, SyncIntent::CreateList { name: name.to_string() })
            .await
    }

    async fn update_list(&self, list_id: ListId, update: &UpdateListRequest) -> AppResult<ApiMyList> {
        let request = self
            .client
            .put(self.url(&format!("/lists/{}", list_id)))
            .json(update);
        self.send_json(request, SyncIntent::UpdateList { list_id }).await
    }

    async fn delete_list(&self, list_id: ListId) -> AppResult<()> {
        let request = self.client.delete(self.url(&format!("/lists/{}", list_id)));
        self.send_empty(request, SyncIntent::DeleteList { list_id }).await
    }

    async fn add_location(&self, list_id: ListId, draft: &LocationDraft) -> AppResult<ApiLocation> {
        let body = AddLocationRequest::from(draft);
        let request = self
            .client
            .post(self.url(&format!("/lists/{}/locations", list_id)))
            .json(&body);
        let intent = SyncIntent::AddLocation {
            list_id,
            name: draft.name.clone(),
        };
        self.send_json(request, intent).await
    }

    async fn remove_location(&self, list_id: ListId, location_id: LocationId) -> AppResult<()> {
        let request = self
            .client
            .delete(self.url(&format!("/lists/{}/locations/{}", list_id, location_id)));
        self.send_empty(request, SyncIntent::RemoveLocation { list_id, location_id })
            .await
    }

    async fn reorder_locations(
        &self,
        list_id: ListId,
        location_ids: &[LocationId],
    ) -> AppResult<Vec<ApiLocation>> {
        let body = ReorderLocationsRequest {
            location_ids: location_ids.iter().map(|id| id.0).collect(),
        };
        let request = self
            .client
            .put(self.url(&format!("/lists/{}/locations/reorder", list_id)))
            .json(&body);
        self.send_json(request, SyncIntent::ReorderLocations { list_id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    #[test]
    fn test_base_url_is_normalized() {
        let client = MyListApiClient::new("http://localhost:8000/api/v1/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.url("/lists/3"), "http://localhost:8000/api/v1/lists/3");
    }

    #[tokio::test]
    async fn test_transport_failure_is_sync_error() {
        // Puerto 9 (discard) no tiene servidor HTTP escuchando
        let client = MyListApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        match client.delete_list(ListId(4)).await {
            Err(AppError::Sync { intent, status, .. }) => {
                assert_eq!(intent, SyncIntent::DeleteList { list_id: ListId(4) });
                assert_eq!(status, None);
            }
            other => panic!("expected sync error, got {:?}", other),
        }
    }
}
