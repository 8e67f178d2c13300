//! Sesión de listas
//!
//! Agrupa el store y el optimizador de una sesión de usuario. Se crea de
//! forma explícita y se cierra con `shutdown`, que suelta todas las listas
//! y rutas cacheadas.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::{GoogleDirectionsClient, MyListApiClient, OptimizationProvider, PersistenceApi};
use crate::config::environment::EnvironmentConfig;
use crate::models::{ListId, Route};
use crate::services::{ListStore, RouteOptimizerService};
use crate::utils::errors::AppResult;

pub struct MyListSession {
    store: ListStore,
    optimizer: RouteOptimizerService,
}

impl MyListSession {
    /// Crear los clientes HTTP desde la configuración y cargar las listas
    pub async fn start(config: &EnvironmentConfig) -> Result<Self> {
        let api = MyListApiClient::new(config.my_list_api_url.clone(), config.http_timeout())?;

        let api_key = config.google_maps_api_key.clone().unwrap_or_else(|| {
            warn!("⚠️ GOOGLE_MAPS_API_KEY no configurada, el cálculo de rutas fallará");
            String::new()
        });
        let provider = GoogleDirectionsClient::new(
            config.directions_api_url.clone(),
            api_key,
            config.http_timeout(),
        )?;

        let session = Self::with_backends(Arc::new(api), Arc::new(provider))
            .with_travel_mode(config.travel_mode.clone());
        let lists = session.store.load_lists().await?;
        info!("📋 Sesión iniciada con {} listas", lists.len());
        Ok(session)
    }

    /// Crear la sesión con colaboradores inyectados, sin cargar nada
    pub fn with_backends(
        api: Arc<dyn PersistenceApi>,
        provider: Arc<dyn OptimizationProvider>,
    ) -> Self {
        let store = ListStore::new(api);
        let optimizer = RouteOptimizerService::new(store.clone(), provider);
        Self { store, optimizer }
    }

    pub fn with_travel_mode(mut self, travel_mode: impl Into<String>) -> Self {
        self.optimizer = self.optimizer.with_travel_mode(travel_mode);
        self
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    pub fn optimizer(&self) -> &RouteOptimizerService {
        &self.optimizer
    }

    pub async fn compute_route(&self, list_id: ListId) -> AppResult<Route> {
        self.optimizer.compute_route(list_id).await
    }

    pub async fn shutdown(self) {
        self.store.clear().await;
        info!("👋 Sesión cerrada");
    }
}
