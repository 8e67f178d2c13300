use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::dto::my_list_dto::{
    AddLocationRequest, ApiLocation, ApiMyList, CreateListRequest, ReorderLocationsRequest,
    UpdateListRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_my_list_router() -> Router<AppState> {
    Router::new()
        .route("/lists", get(list_my_lists).post(create_my_list))
        .route(
            "/lists/:list_id",
            get(get_my_list).put(update_my_list).delete(delete_my_list),
        )
        .route("/lists/:list_id/locations", post(add_location))
        .route("/lists/:list_id/locations/reorder", put(reorder_locations))
        .route(
            "/lists/:list_id/locations/:location_id",
            delete(remove_location),
        )
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    100
}

async fn list_my_lists(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Json<Vec<ApiMyList>> {
    Json(state.repository.find_all(page.skip, page.limit).await)
}

async fn create_my_list(
    State(state): State<AppState>,
    Json(request): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<ApiMyList>), AppError> {
    let list = state.repository.create(request).await?;
    tracing::info!("📋 Lista creada: {} ({})", list.name, list.id);
    Ok((StatusCode::CREATED, Json(list)))
}

async fn get_my_list(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
) -> Result<Json<ApiMyList>, AppError> {
    Ok(Json(state.repository.find_by_id(list_id).await?))
}

async fn update_my_list(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Json(request): Json<UpdateListRequest>,
) -> Result<Json<ApiMyList>, AppError> {
    Ok(Json(state.repository.update(list_id, request).await?))
}

async fn delete_my_list(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.repository.delete(list_id).await?;
    tracing::info!("🗑️ Lista {} eliminada", list_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn add_location(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Json(request): Json<AddLocationRequest>,
) -> Result<(StatusCode, Json<ApiLocation>), AppError> {
    let location = state.repository.add_location(list_id, request).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

async fn remove_location(
    State(state): State<AppState>,
    Path((list_id, location_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state.repository.remove_location(list_id, location_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_locations(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Json(request): Json<ReorderLocationsRequest>,
) -> Result<Json<Vec<ApiLocation>>, AppError> {
    Ok(Json(state.repository.reorder(list_id, &request.location_ids).await?))
}
