//! My List Routes
//!
//! Motor de sincronización de listas de ubicaciones con cache de rutas
//! optimizadas, más el servicio de persistencia de referencia.

pub mod cache;
pub mod clients;
pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_for;
use crate::state::AppState;

/// Router completo del servicio de persistencia, montado bajo `/api/v1`
pub fn build_app(state: AppState) -> Router {
    let cors = cors_for(&state.config.cors_origins);
    Router::new()
        .nest("/api/v1", routes::create_my_list_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub use services::{ListStore, RouteOptimizerService};
pub use session::MyListSession;
pub use utils::{AppError, AppResult, SyncIntent};
