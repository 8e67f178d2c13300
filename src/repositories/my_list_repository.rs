use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use validator::Validate;

use crate::dto::my_list_dto::{
    AddLocationRequest, ApiLocation, ApiMyList, CreateListRequest, UpdateListRequest,
};
use crate::models::LocationDraft;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::validate_list_name;

#[derive(Debug, Clone)]
struct StoredList {
    id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    locations: Vec<ApiLocation>,
}

impl StoredList {
    fn to_api(&self) -> ApiMyList {
        let mut locations = self.locations.clone();
        locations.sort_by_key(|loc| loc.order_index);
        ApiMyList {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            locations,
        }
    }

    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

#[derive(Debug, Default)]
struct RepositoryState {
    next_list_id: i64,
    next_location_id: i64,
    lists: BTreeMap<i64, StoredList>,
}

/// Repositorio en memoria de listas y ubicaciones
#[derive(Clone, Default)]
pub struct MyListRepository {
    state: Arc<RwLock<RepositoryState>>,
}

impl MyListRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listas ordenadas por `updated_at` descendente
    pub async fn find_all(&self, skip: usize, limit: usize) -> Vec<ApiMyList> {
        let state = self.state.read().await;
        let mut lists: Vec<&StoredList> = state.lists.values().collect();
        lists.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        lists
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(StoredList::to_api)
            .collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<ApiMyList, AppError> {
        let state = self.state.read().await;
        state
            .lists
            .get(&id)
            .map(StoredList::to_api)
            .ok_or_else(|| not_found_error("List", id))
    }

    pub async fn create(&self, request: CreateListRequest) -> Result<ApiMyList, AppError> {
        validate_list_name(&request.name)?;

        let mut state = self.state.write().await;
        state.next_list_id += 1;
        let now = Utc::now();
        let list = StoredList {
            id: state.next_list_id,
            name: request.name,
            description: request.description,
            created_at: now,
            updated_at: now,
            locations: Vec::new(),
        };
        let api = list.to_api();
        state.lists.insert(list.id, list);
        Ok(api)
    }

    pub async fn update(&self, id: i64, request: UpdateListRequest) -> Result<ApiMyList, AppError> {
        if let Some(name) = &request.name {
            validate_list_name(name)?;
        }

        let mut state = self.state.write().await;
        let list = state
            .lists
            .get_mut(&id)
            .ok_or_else(|| not_found_error("List", id))?;

        if let Some(name) = request.name {
            list.name = name;
        }
        if let Some(description) = request.description {
            list.description = description;
        }
        list.touch();
        Ok(list.to_api())
    }

    /// Elimina la lista y en cascada sus ubicaciones
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state
            .lists
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found_error("List", id))
    }

    pub async fn add_location(
        &self,
        list_id: i64,
        request: AddLocationRequest,
    ) -> Result<ApiLocation, AppError> {
        let draft = LocationDraft {
            name: request.name,
            address: request.address,
            lat: request.lat,
            lng: request.lng,
            place_id: request.place_id,
        };
        draft.validate()?;

        let mut state = self.state.write().await;
        if !state.lists.contains_key(&list_id) {
            return Err(not_found_error("List", list_id));
        }
        state.next_location_id += 1;
        let location_id = state.next_location_id;

        let list = state
            .lists
            .get_mut(&list_id)
            .ok_or_else(|| not_found_error("List", list_id))?;
        let location = ApiLocation {
            id: location_id,
            my_list_id: list_id,
            name: draft.name,
            address: draft.address,
            lat: draft.lat,
            lng: draft.lng,
            place_id: draft.place_id,
            order_index: list.locations.len() as i32,
            created_at: Utc::now(),
        };
        list.locations.push(location.clone());
        list.touch();
        Ok(location)
    }

    pub async fn remove_location(&self, list_id: i64, location_id: i64) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let list = state
            .lists
            .get_mut(&list_id)
            .ok_or_else(|| not_found_error("List", list_id))?;

        let before = list.locations.len();
        list.locations.retain(|loc| loc.id != location_id);
        if list.locations.len() == before {
            return Err(not_found_error("Location", location_id));
        }
        list.touch();
        Ok(())
    }

    /// Reescribe `order_index` según la posición y devuelve el nuevo orden
    pub async fn reorder(&self, list_id: i64, location_ids: &[i64]) -> Result<Vec<ApiLocation>, AppError> {
        let mut state = self.state.write().await;
        let list = state
            .lists
            .get_mut(&list_id)
            .ok_or_else(|| not_found_error("List", list_id))?;

        if let Some(unknown) = location_ids
            .iter()
            .find(|id| !list.locations.iter().any(|loc| loc.id == **id))
        {
            return Err(validation_error(format!("Location {} not found in list", unknown)));
        }

        for (index, id) in location_ids.iter().enumerate() {
            if let Some(loc) = list.locations.iter_mut().find(|loc| loc.id == *id) {
                loc.order_index = index as i32;
            }
        }
        list.locations.sort_by_key(|loc| loc.order_index);
        list.touch();
        Ok(list.locations.clone())
    }
}
