//! Dobles de prueba para los colaboradores externos

use async_trait::async_trait;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::clients::{OptimizationProvider, PersistenceApi};
use crate::dto::directions_dto::{OptimizationRequest, OptimizationResult, ProviderLeg};
use crate::dto::my_list_dto::{
    AddLocationRequest, ApiLocation, ApiMyList, CreateListRequest, UpdateListRequest,
};
use crate::models::{ListId, LocationDraft, LocationId};
use crate::repositories::MyListRepository;
use crate::utils::errors::{route_error, sync_error, AppError, AppResult, SyncIntent};

/// API de persistencia en proceso, respaldada por el repositorio en memoria
pub struct FakePersistenceApi {
    repository: MyListRepository,
    calls: AtomicUsize,
    fail_next: AtomicBool,
    hold_next: Mutex<Option<Arc<Notify>>>,
}

impl FakePersistenceApi {
    pub fn new() -> Self {
        Self {
            repository: MyListRepository::new(),
            calls: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
            hold_next: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// La próxima llamada falla sin tocar el servidor
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// La próxima llamada se aplica en el servidor pero no responde hasta `notify_one`
    pub fn hold_next(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.hold_next.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Cambio hecho por otro cliente
    pub async fn server_reorder(&self, list_id: ListId, ids: &[LocationId]) {
        let raw: Vec<i64> = ids.iter().map(|id| id.0).collect();
        self.repository.reorder(list_id.0, &raw).await.unwrap();
    }

    pub async fn server_delete(&self, list_id: ListId) {
        self.repository.delete(list_id.0).await.unwrap();
    }

    async fn call<T>(&self, intent: SyncIntent, op: impl Future<Output = Result<T, AppError>>) -> AppResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(sync_error(intent, Some(503), "injected failure"));
        }

        let result = op.await.map_err(|e| {
            let status = match e {
                AppError::NotFound(_) => 404,
                AppError::Validation(_) => 400,
                _ => 500,
            };
            sync_error(intent, Some(status), e.to_string())
        });

        let gate = self.hold_next.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }
}

#[async_trait]
impl PersistenceApi for FakePersistenceApi {
    async fn fetch_lists(&self) -> AppResult<Vec<ApiMyList>> {
        self.call(SyncIntent::FetchLists, async { Ok(self.repository.find_all(0, 100).await) })
            .await
    }

    async fn fetch_list(&self, list_id: ListId) -> AppResult<ApiMyList> {
        self.call(SyncIntent::FetchList { list_id }, self.repository.find_by_id(list_id.0))
            .await
    }

    async fn create_list(&self, name: &str, description: &str) -> AppResult<ApiMyList> {
        let request = CreateListRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        self.call(
            SyncIntent::CreateList { name: name.to_string() },
            self.repository.create(request),
        )
        .await
    }

    async fn update_list(&self, list_id: ListId, update: &UpdateListRequest) -> AppResult<ApiMyList> {
        self.call(
            SyncIntent::UpdateList { list_id },
            self.repository.update(list_id.0, update.clone()),
        )
        .await
    }

    async fn delete_list(&self, list_id: ListId) -> AppResult<()> {
        self.call(SyncIntent::DeleteList { list_id }, self.repository.delete(list_id.0))
            .await
    }

    async fn add_location(&self, list_id: ListId, draft: &LocationDraft) -> AppResult<ApiLocation> {
        let intent = SyncIntent::AddLocation {
            list_id,
            name: draft.name.clone(),
        };
        self.call(
            intent,
            self.repository.add_location(list_id.0, AddLocationRequest::from(draft)),
        )
        .await
    }

    async fn remove_location(&self, list_id: ListId, location_id: LocationId) -> AppResult<()> {
        self.call(
            SyncIntent::RemoveLocation { list_id, location_id },
            self.repository.remove_location(list_id.0, location_id.0),
        )
        .await
    }

    async fn reorder_locations(
        &self,
        list_id: ListId,
        location_ids: &[LocationId],
    ) -> AppResult<Vec<ApiLocation>> {
        let raw: Vec<i64> = location_ids.iter().map(|id| id.0).collect();
        self.call(
            SyncIntent::ReorderLocations { list_id },
            async move { self.repository.reorder(list_id.0, &raw).await },
        )
        .await
    }
}

/// Proveedor de optimización programable
pub struct FakeOptimizationProvider {
    responses: Mutex<VecDeque<AppResult<OptimizationResult>>>,
    requests: Mutex<Vec<OptimizationRequest>>,
    hold_next: Mutex<Option<Arc<Notify>>>,
}

impl FakeOptimizationProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            hold_next: Mutex::new(None),
        }
    }

    pub fn push_result(&self, waypoint_order: Vec<usize>, legs: Vec<(u64, u64)>) {
        let legs = legs
            .into_iter()
            .map(|(distance, duration)| ProviderLeg { distance, duration })
            .collect();
        self.responses.lock().unwrap().push_back(Ok(OptimizationResult { waypoint_order, legs }));
    }

    pub fn push_failure(&self, status: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(route_error(format!("directions request failed: {}", status))));
    }

    pub fn hold_next(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.hold_next.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn requests(&self) -> Vec<OptimizationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OptimizationProvider for FakeOptimizationProvider {
    async fn optimize(&self, request: &OptimizationRequest) -> AppResult<OptimizationResult> {
        self.requests.lock().unwrap().push(request.clone());
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(route_error("no scripted response")));

        let gate = self.hold_next.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        response
    }
}
