//! Store de listas y ubicaciones
//!
//! Dueño exclusivo de las listas, sus secuencias de ubicaciones y la cache
//! de rutas derivadas. Toda mutación:
//!
//! 1. valida la entrada y la existencia local (sin red),
//! 2. espera su turno en el candado de la lista,
//! 3. llama a la API de persistencia,
//! 4. y solo tras el éxito adopta la respuesta del servidor tal cual.
//!
//! Las mutaciones estructurales (agregar, quitar, reordenar) invalidan la
//! ruta cacheada y avanzan la revisión estructural de la lista en la misma
//! sección crítica; las de metadatos no tocan la cache.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use validator::Validate;

use crate::cache::{ListGuards, RouteCache};
use crate::clients::PersistenceApi;
use crate::dto::my_list_dto::{locations_in_order, UpdateListRequest};
use crate::models::{ListId, ListUpdate, Location, LocationDraft, LocationId, MyList, Route};
use crate::utils::errors::{not_found_error, route_error, validation_error, AppResult};
use crate::utils::validation::{validate_list_name, validate_permutation};

/// Copia de la secuencia de una lista tomada antes de calcular una ruta
#[derive(Debug, Clone)]
pub struct RouteSnapshot {
    pub list_id: ListId,
    pub locations: Vec<Location>,
    pub revision: u64,
}

#[derive(Default)]
struct StoreState {
    lists: Vec<MyList>,
    revisions: HashMap<ListId, u64>,
    routes: RouteCache,
}

impl StoreState {
    fn list(&self, list_id: ListId) -> Option<&MyList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    fn list_mut(&mut self, list_id: ListId) -> Option<&mut MyList> {
        self.lists.iter_mut().find(|list| list.id == list_id)
    }

    fn revision(&self, list_id: ListId) -> u64 {
        self.revisions.get(&list_id).copied().unwrap_or(0)
    }

    /// Registrar un cambio estructural: nueva revisión y ruta invalidada
    fn structural_change(&mut self, list_id: ListId) {
        *self.revisions.entry(list_id).or_insert(0) += 1;
        self.routes.invalidate(list_id);
    }

    fn remove_list(&mut self, list_id: ListId) {
        self.lists.retain(|list| list.id != list_id);
        self.revisions.remove(&list_id);
        self.routes.invalidate(list_id);
    }

    /// Adoptar una lista del servidor; si su secuencia cambió, la ruta cae
    fn adopt(&mut self, incoming: MyList) {
        let list_id = incoming.id;
        match self.list_mut(list_id) {
            Some(existing) => {
                let sequence_changed = existing.location_ids() != incoming.location_ids();
                *existing = incoming;
                if sequence_changed {
                    self.structural_change(list_id);
                }
            }
            None => self.lists.push(incoming),
        }
    }
}

/// Store de listas con cache de rutas unificada
#[derive(Clone)]
pub struct ListStore {
    api: Arc<dyn PersistenceApi>,
    state: Arc<RwLock<StoreState>>,
    guards: ListGuards,
}

impl ListStore {
    pub fn new(api: Arc<dyn PersistenceApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(StoreState::default())),
            guards: ListGuards::new(),
        }
    }

    // ---- Lecturas ----

    /// Todas las listas, en el orden del store
    pub async fn lists(&self) -> Vec<MyList> {
        self.state.read().await.lists.clone()
    }

    pub async fn get_list(&self, list_id: ListId) -> Option<MyList> {
        self.state.read().await.list(list_id).cloned()
    }

    /// Ruta cacheada de la lista; nunca calcula
    pub async fn route(&self, list_id: ListId) -> Option<Route> {
        self.state.read().await.routes.get(list_id).cloned()
    }

    /// Todas las rutas cacheadas
    pub async fn routes(&self) -> HashMap<ListId, Route> {
        let state = self.state.read().await;
        state
            .lists
            .iter()
            .filter_map(|list| state.routes.get(list.id).map(|route| (list.id, route.clone())))
            .collect()
    }

    // ---- Sincronización completa ----

    /// Reemplazar las listas locales por el conjunto canónico del servidor
    pub async fn load_lists(&self) -> AppResult<Vec<MyList>> {
        let incoming: Vec<MyList> = self
            .api
            .fetch_lists()
            .await?
            .into_iter()
            .map(MyList::from)
            .collect();

        let mut state = self.state.write().await;
        let previous: HashMap<ListId, Vec<LocationId>> = state
            .lists
            .iter()
            .map(|list| (list.id, list.location_ids()))
            .collect();

        for list in &incoming {
            if let Some(old_ids) = previous.get(&list.id) {
                if *old_ids != list.location_ids() {
                    state.structural_change(list.id);
                }
            }
        }
        let known = |list_id: ListId| incoming.iter().any(|list| list.id == list_id);
        state.revisions.retain(|list_id, _| known(*list_id));
        state.routes.retain(|list_id, _| known(list_id));

        state.lists = incoming.clone();
        log::info!("✅ {} listas cargadas desde el servidor", incoming.len());
        Ok(incoming)
    }

    /// Volver a adoptar una lista tal como la tiene el servidor
    pub async fn refresh_list(&self, list_id: ListId) -> AppResult<MyList> {
        let _turn = self.guards.acquire(list_id).await;

        let list = MyList::from(self.api.fetch_list(list_id).await?);

        let mut state = self.state.write().await;
        state.adopt(list.clone());
        log::info!("🔄 Lista {} sincronizada", list_id);
        Ok(list)
    }

    // ---- Operaciones de listas ----

    pub async fn create_list(&self, name: &str, description: Option<&str>) -> AppResult<MyList> {
        validate_list_name(name)?;

        let created = MyList::from(
            self.api
                .create_list(name.trim(), description.unwrap_or_default())
                .await?,
        );

        let mut state = self.state.write().await;
        state.adopt(created.clone());
        log::info!("📋 Lista creada: {} ({})", created.name, created.id);
        Ok(created)
    }

    /// Actualizar metadatos; no invalida la ruta cacheada
    pub async fn update_list(&self, list_id: ListId, update: ListUpdate) -> AppResult<MyList> {
        if update.is_empty() {
            return Err(validation_error("update must change name or description"));
        }
        if let Some(name) = &update.name {
            validate_list_name(name)?;
        }
        self.ensure_list(list_id).await?;

        let _turn = self.guards.acquire(list_id).await;

        let request = UpdateListRequest {
            name: update.name.map(|name| name.trim().to_string()),
            description: update.description,
        };
        let updated = MyList::from(self.api.update_list(list_id, &request).await?);

        let mut state = self.state.write().await;
        if state.list(list_id).is_none() {
            return Err(stale_response(list_id));
        }
        state.adopt(updated.clone());
        log::info!("✏️ Lista {} actualizada", list_id);
        Ok(updated)
    }

    /// Eliminar la lista junto con su ruta cacheada
    pub async fn delete_list(&self, list_id: ListId) -> AppResult<()> {
        self.ensure_list(list_id).await?;

        {
            let _turn = self.guards.acquire(list_id).await;
            self.api.delete_list(list_id).await?;

            let mut state = self.state.write().await;
            state.remove_list(list_id);
        }

        self.guards.forget(list_id).await;
        log::info!("🗑️ Lista {} eliminada", list_id);
        Ok(())
    }

    // ---- Operaciones estructurales ----

    /// Agregar una ubicación al final de la lista
    pub async fn add_location(&self, list_id: ListId, draft: LocationDraft) -> AppResult<Location> {
        draft.validate()?;
        self.ensure_list(list_id).await?;

        let _turn = self.guards.acquire(list_id).await;

        let location = Location::from(self.api.add_location(list_id, &draft).await?);

        let mut state = self.state.write().await;
        let list = state
            .list_mut(list_id)
            .ok_or_else(|| stale_response(list_id))?;
        // Una recarga concurrente pudo haber adoptado ya la ubicación
        if !list.contains_location(location.id) {
            list.locations.push(location.clone());
            list.touch();
            state.structural_change(list_id);
        }

        log::info!("📍 Ubicación {} agregada a lista {}", location.id, list_id);
        Ok(location)
    }

    pub async fn remove_location(&self, list_id: ListId, location_id: LocationId) -> AppResult<()> {
        self.ensure_list(list_id).await?;

        let _turn = self.guards.acquire(list_id).await;

        {
            let state = self.state.read().await;
            let present = state
                .list(list_id)
                .map(|list| list.contains_location(location_id))
                .unwrap_or(false);
            if !present {
                return Err(not_found_error("Location", location_id));
            }
        }

        self.api.remove_location(list_id, location_id).await?;

        let mut state = self.state.write().await;
        let list = state
            .list_mut(list_id)
            .ok_or_else(|| stale_response(list_id))?;
        if list.contains_location(location_id) {
            list.locations.retain(|loc| loc.id != location_id);
            list.touch();
            state.structural_change(list_id);
        }

        log::info!("🗑️ Ubicación {} quitada de lista {}", location_id, list_id);
        Ok(())
    }

    /// Reordenar; `new_order` debe ser exactamente una permutación de los ids actuales
    pub async fn reorder_locations(
        &self,
        list_id: ListId,
        new_order: &[LocationId],
    ) -> AppResult<Vec<Location>> {
        self.ensure_list(list_id).await?;

        let _turn = self.guards.acquire(list_id).await;

        {
            let state = self.state.read().await;
            let list = state
                .list(list_id)
                .ok_or_else(|| not_found_error("List", list_id))?;
            validate_permutation(&list.location_ids(), new_order)?;
        }

        let locations = locations_in_order(self.api.reorder_locations(list_id, new_order).await?);

        let mut state = self.state.write().await;
        let list = state
            .list_mut(list_id)
            .ok_or_else(|| stale_response(list_id))?;
        list.locations = locations.clone();
        list.touch();
        state.structural_change(list_id);

        log::info!("🔀 Lista {} reordenada ({} ubicaciones)", list_id, locations.len());
        Ok(locations)
    }

    // ---- Cache de rutas ----

    /// Invalidar explícitamente la ruta de una lista
    pub async fn clear_route(&self, list_id: ListId) {
        self.state.write().await.routes.invalidate(list_id);
    }

    /// Tomar la secuencia actual y su revisión para calcular una ruta
    pub async fn route_snapshot(&self, list_id: ListId) -> AppResult<RouteSnapshot> {
        let state = self.state.read().await;
        let list = state
            .list(list_id)
            .ok_or_else(|| not_found_error("List", list_id))?;

        Ok(RouteSnapshot {
            list_id,
            locations: list.locations.clone(),
            revision: state.revision(list_id),
        })
    }

    /// Guardar una ruta solo si la lista no cambió desde el snapshot
    pub async fn commit_route(&self, snapshot: &RouteSnapshot, route: Route) -> AppResult<()> {
        let mut state = self.state.write().await;

        let current_ids = match state.list(snapshot.list_id) {
            Some(list) => list.location_ids(),
            None => {
                log::warn!("⚠️ Lista {} eliminada durante el cálculo; ruta descartada", snapshot.list_id);
                return Err(not_found_error("List", snapshot.list_id));
            }
        };

        if state.revision(snapshot.list_id) != snapshot.revision {
            log::warn!("⚠️ Lista {} cambió durante el cálculo; ruta descartada", snapshot.list_id);
            return Err(route_error(format!(
                "list {} changed during computation",
                snapshot.list_id
            )));
        }

        if !route.matches_locations(&current_ids) {
            return Err(route_error(format!(
                "optimized order does not match the locations of list {}",
                snapshot.list_id
            )));
        }

        state.routes.set(snapshot.list_id, route);
        Ok(())
    }

    /// Soltar todo el estado local (fin de sesión)
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.lists.clear();
        state.revisions.clear();
        state.routes.clear();
        drop(state);
        self.guards.clear().await;
    }

    async fn ensure_list(&self, list_id: ListId) -> AppResult<()> {
        match self.state.read().await.list(list_id) {
            Some(_) => Ok(()),
            None => Err(not_found_error("List", list_id)),
        }
    }
}

fn stale_response(list_id: ListId) -> crate::utils::errors::AppError {
    log::warn!("⚠️ Respuesta obsoleta descartada: la lista {} ya no existe", list_id);
    not_found_error("List", list_id)
}
