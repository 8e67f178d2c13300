//! Pruebas de integración: servicio de persistencia real (axum en un puerto
//! efímero) y un endpoint de Directions simulado, recorridos con los clientes
//! `reqwest` del crate.

use axum::{extract::Query, routing::get, Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use my_list_routes::build_app;
use my_list_routes::clients::{GoogleDirectionsClient, MyListApiClient, PersistenceApi};
use my_list_routes::models::{ListId, ListUpdate, LocationDraft, LocationId};
use my_list_routes::state::AppState;
use my_list_routes::{AppError, ListStore, MyListSession, SyncIntent};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn persistence_client() -> MyListApiClient {
    let base = spawn(build_app(AppState::new())).await;
    MyListApiClient::new(format!("{}/api/v1/", base), Duration::from_secs(5)).unwrap()
}

/// Directions simulado: invierte los dos waypoints intermedios, o rechaza la clave "bad"
async fn directions_stub(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if params.get("key").map(String::as_str) == Some("bad") {
        return Json(json!({ "status": "REQUEST_DENIED", "error_message": "invalid key", "routes": [] }));
    }

    let waypoints = params.get("waypoints").cloned().unwrap_or_default();
    assert!(waypoints.starts_with("optimize:true|"));

    Json(json!({
        "status": "OK",
        "routes": [{
            "waypoint_order": [1, 0],
            "legs": [
                { "distance": { "text": "1.0 km", "value": 1000 }, "duration": { "text": "2 mins", "value": 120 } },
                { "distance": { "text": "2.0 km", "value": 2000 }, "duration": { "text": "4 mins", "value": 240 } },
                { "distance": { "text": "0.5 km", "value": 500 }, "duration": { "text": "1 min", "value": 60 } }
            ]
        }]
    }))
}

async fn directions_client(key: &str) -> GoogleDirectionsClient {
    let base = spawn(Router::new().route("/directions/json", get(directions_stub))).await;
    GoogleDirectionsClient::new(format!("{}/directions/json", base), key, Duration::from_secs(5)).unwrap()
}

fn draft(name: &str, lat: f64) -> LocationDraft {
    LocationDraft::new(name, format!("{} address", name), lat, 139.7)
}

async fn trip(store: &ListStore) -> (ListId, Vec<LocationId>) {
    let list = store.create_list("Trip", Some("weekend")).await.unwrap();
    let mut ids = Vec::new();
    for (name, lat) in [("A", 35.60), ("B", 35.65), ("C", 35.70), ("D", 35.75)] {
        ids.push(store.add_location(list.id, draft(name, lat)).await.unwrap().id);
    }
    (list.id, ids)
}

#[tokio::test]
async fn test_trip_route_through_real_clients() {
    let api = persistence_client().await;
    let provider = directions_client("key").await;
    let session = MyListSession::with_backends(Arc::new(api), Arc::new(provider));

    let (list_id, ids) = trip(session.store()).await;
    let route = session.compute_route(list_id).await.unwrap();

    assert_eq!(route.optimized_order, vec![ids[0], ids[2], ids[1], ids[3]]);
    assert_eq!(route.total_distance, 3500);
    assert_eq!(route.total_duration, 420);
    assert_eq!(route.legs.len(), 3);
    assert_eq!(route.formatted_distance(), "3.5 km");
    assert_eq!(session.store().route(list_id).await, Some(route));

    // Reordenar es estructural: invalida la ruta y adopta el orden del servidor
    let reordered = session
        .store()
        .reorder_locations(list_id, &[ids[3], ids[2], ids[1], ids[0]])
        .await
        .unwrap();
    assert_eq!(reordered[0].id, ids[3]);
    assert!(session.store().route(list_id).await.is_none());

    // Los metadatos no tocan la ruta
    session.compute_route(list_id).await.unwrap();
    let renamed = session
        .store()
        .update_list(list_id, ListUpdate { name: Some("Tokyo".to_string()), description: None })
        .await
        .unwrap();
    assert_eq!(renamed.name, "Tokyo");
    assert_eq!(renamed.description, "weekend");
    assert!(session.store().route(list_id).await.is_some());

    session.shutdown().await;
}

#[tokio::test]
async fn test_store_reload_matches_server() {
    let api = Arc::new(persistence_client().await);
    let store = ListStore::new(api.clone());
    let (list_id, ids) = trip(&store).await;

    store.remove_location(list_id, ids[1]).await.unwrap();

    let fresh = ListStore::new(api);
    let lists = fresh.load_lists().await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].location_ids(), vec![ids[0], ids[2], ids[3]]);
    let local = store.get_list(list_id).await.unwrap();
    assert_eq!(local.location_ids(), lists[0].location_ids());
    assert_eq!(local.description, "weekend");

    store.delete_list(list_id).await.unwrap();
    assert!(fresh.load_lists().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_reorder_never_reaches_server() {
    let api = Arc::new(persistence_client().await);
    let store = ListStore::new(api.clone());
    let (list_id, ids) = trip(&store).await;

    let result = store
        .reorder_locations(list_id, &[ids[0], ids[1], ids[2], LocationId(999)])
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let server = api.fetch_list(list_id).await.unwrap();
    let server_ids: Vec<i64> = server.locations.iter().map(|loc| loc.id).collect();
    let local_ids: Vec<i64> = ids.iter().map(|id| id.0).collect();
    assert_eq!(server_ids, local_ids);
}

#[tokio::test]
async fn test_server_rejections_surface_as_sync_errors() {
    let api = persistence_client().await;

    match api.fetch_list(ListId(42)).await {
        Err(AppError::Sync { intent, status, .. }) => {
            assert_eq!(intent, SyncIntent::FetchList { list_id: ListId(42) });
            assert_eq!(status, Some(404));
        }
        other => panic!("expected sync error, got {:?}", other),
    }

    let list = api.create_list("Trip", "").await.unwrap();
    let result = api.reorder_locations(ListId(list.id), &[LocationId(7)]).await;
    assert!(matches!(result, Err(AppError::Sync { status: Some(400), .. })));
}

#[tokio::test]
async fn test_directions_rejection_keeps_cached_route_absent() {
    let api = persistence_client().await;
    let provider = directions_client("bad").await;
    let session = MyListSession::with_backends(Arc::new(api), Arc::new(provider));

    let (list_id, _) = trip(session.store()).await;
    let result = session.compute_route(list_id).await;

    match result {
        Err(AppError::RouteComputation(message)) => assert!(message.contains("REQUEST_DENIED")),
        other => panic!("expected route error, got {:?}", other),
    }
    assert!(session.store().route(list_id).await.is_none());
}

#[tokio::test]
async fn test_place_id_survives_http_round_trip() {
    let api = Arc::new(persistence_client().await);
    let store = ListStore::new(api.clone());
    let list = store.create_list("Trip", None).await.unwrap();

    let added = store
        .add_location(list.id, draft("Tower", 35.66).with_place_id("ChIJCewJkL2LGGAR3Qmk0vCTGkg"))
        .await
        .unwrap();
    assert_eq!(added.place_id.as_deref(), Some("ChIJCewJkL2LGGAR3Qmk0vCTGkg"));

    let server = api.fetch_list(list.id).await.unwrap();
    assert_eq!(server.locations[0].place_id.as_deref(), Some("ChIJCewJkL2LGGAR3Qmk0vCTGkg"));
}
