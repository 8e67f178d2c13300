//! Servicio de optimización de rutas
//!
//! Toma la secuencia actual de una lista, fija la primera ubicación como
//! origen y la última como destino, y pide al proveedor reordenar solo los
//! waypoints intermedios. La permutación devuelta se traduce a ids de
//! ubicación (nunca a coordenadas) y las métricas se suman en metros y
//! segundos.

use std::sync::Arc;

use crate::clients::OptimizationProvider;
use crate::dto::directions_dto::{OptimizationRequest, OptimizationResult};
use crate::models::{ListId, Location, Route, RouteLeg};
use crate::services::list_store_service::ListStore;
use crate::utils::errors::{route_error, validation_error, AppError, AppResult};
use crate::utils::validation::is_index_permutation;

pub const DEFAULT_TRAVEL_MODE: &str = "DRIVING";

pub struct RouteOptimizerService {
    store: ListStore,
    provider: Arc<dyn OptimizationProvider>,
    travel_mode: String,
}

impl RouteOptimizerService {
    pub fn new(store: ListStore, provider: Arc<dyn OptimizationProvider>) -> Self {
        Self {
            store,
            provider,
            travel_mode: DEFAULT_TRAVEL_MODE.to_string(),
        }
    }

    pub fn with_travel_mode(mut self, travel_mode: impl Into<String>) -> Self {
        self.travel_mode = travel_mode.into();
        self
    }

    /// Calcular y cachear la ruta optimizada de una lista
    ///
    /// Si la lista cambia estructuralmente mientras el proveedor responde,
    /// el resultado se descarta y la cache queda como la dejó la mutación.
    pub async fn compute_route(&self, list_id: ListId) -> AppResult<Route> {
        let snapshot = self.store.route_snapshot(list_id).await?;

        if snapshot.locations.len() < 2 {
            return Err(validation_error(format!(
                "a route needs at least two locations (list {} has {})",
                list_id,
                snapshot.locations.len()
            )));
        }

        let request = build_request(&snapshot.locations, &self.travel_mode);
        log::info!(
            "🚀 Calculando ruta para lista {} ({} ubicaciones)",
            list_id,
            snapshot.locations.len()
        );

        let result = self.provider.optimize(&request).await.map_err(|e| {
            log::error!("❌ Optimización falló para lista {}: {}", list_id, e);
            match e {
                AppError::RouteComputation(_) => e,
                other => route_error(other.to_string()),
            }
        })?;

        let route = build_route(list_id, &snapshot.locations, result)?;
        self.store.commit_route(&snapshot, route.clone()).await?;

        log::info!(
            "✅ Ruta calculada para lista {}: {} m, {} s",
            list_id,
            route.total_distance,
            route.total_duration
        );
        Ok(route)
    }
}

/// Origen y destino fijos; todo lo intermedio es waypoint reordenable
pub fn build_request(locations: &[Location], travel_mode: &str) -> OptimizationRequest {
    let last = locations.len() - 1;
    OptimizationRequest {
        origin: locations[0].lat_lng(),
        destination: locations[last].lat_lng(),
        waypoints: locations[1..last].iter().map(Location::lat_lng).collect(),
        travel_mode: travel_mode.to_string(),
    }
}

/// Traducir la respuesta del proveedor a una ruta sobre ids estables
pub fn build_route(
    list_id: ListId,
    locations: &[Location],
    result: OptimizationResult,
) -> AppResult<Route> {
    let last = locations.len() - 1;
    let waypoints = &locations[1..last];

    if !is_index_permutation(&result.waypoint_order, waypoints.len()) {
        return Err(route_error(format!(
            "provider returned an invalid waypoint order {:?} for {} waypoints",
            result.waypoint_order,
            waypoints.len()
        )));
    }

    let mut optimized_order = Vec::with_capacity(locations.len());
    optimized_order.push(locations[0].id);
    optimized_order.extend(result.waypoint_order.iter().map(|&index| waypoints[index].id));
    optimized_order.push(locations[last].id);

    if result.legs.len() != optimized_order.len() - 1 {
        return Err(route_error(format!(
            "provider returned {} legs for {} stops",
            result.legs.len(),
            optimized_order.len()
        )));
    }

    let legs: Vec<RouteLeg> = optimized_order
        .windows(2)
        .zip(&result.legs)
        .map(|(pair, leg)| RouteLeg {
            start_location_id: pair[0],
            end_location_id: pair[1],
            distance: leg.distance,
            duration: leg.duration,
        })
        .collect();

    Ok(Route {
        list_id,
        total_distance: legs.iter().map(|leg| leg.distance).sum(),
        total_duration: legs.iter().map(|leg| leg.duration).sum(),
        optimized_order,
        legs,
    })
}
