//! Cliente para la Directions API con optimización de waypoints
//!
//! Envía origen, destino y waypoints con `optimize:true` y traduce la
//! respuesta al contrato interno del optimizador.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::OptimizationProvider;
use crate::dto::directions_dto::{
    DirectionsResponse, OptimizationRequest, OptimizationResult, ProviderLeg,
};
use crate::utils::errors::{route_error, AppResult};

pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

pub struct GoogleDirectionsClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleDirectionsClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Parámetros de query de la Directions API
    fn query_params(&self, request: &OptimizationRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("origin", request.origin.to_string()),
            ("destination", request.destination.to_string()),
            ("mode", request.travel_mode.to_lowercase()),
        ];

        if !request.waypoints.is_empty() {
            let points: Vec<String> = request.waypoints.iter().map(|p| p.to_string()).collect();
            params.push(("waypoints", format!("optimize:true|{}", points.join("|"))));
        }

        params.push(("key", self.api_key.clone()));
        params
    }
}

#[async_trait]
impl OptimizationProvider for GoogleDirectionsClient {
    async fn optimize(&self, request: &OptimizationRequest) -> AppResult<OptimizationResult> {
        log::info!(
            "🚀 Solicitando optimización: {} waypoints entre {} y {}",
            request.waypoints.len(),
            request.origin,
            request.destination
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(request))
            .header("User-Agent", "MyListRoutes/1.0")
            .send()
            .await
            .map_err(|e| route_error(format!("directions request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| route_error(format!("directions response unreadable: {}", e)))?;

        log::info!("📡 Directions response status: {}", status);
        log::debug!("📄 Directions response body: {}", response_text);

        if !status.is_success() {
            return Err(route_error(format!("directions API error {}: {}", status, response_text)));
        }

        let directions: DirectionsResponse = serde_json::from_str(&response_text)
            .map_err(|e| route_error(format!("error parsing directions response: {}", e)))?;

        if directions.status != "OK" {
            let detail = directions.error_message.unwrap_or_default();
            return Err(route_error(format!(
                "directions request failed: {} {}",
                directions.status, detail
            )));
        }

        let route = directions
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| route_error("directions response contained no routes"))?;

        Ok(OptimizationResult {
            waypoint_order: route.waypoint_order,
            legs: route.legs.into_iter().map(ProviderLeg::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LatLng;

    fn request(waypoints: Vec<LatLng>) -> OptimizationRequest {
        OptimizationRequest {
            origin: LatLng { lat: 35.0, lng: 139.0 },
            destination: LatLng { lat: 35.2, lng: 139.2 },
            waypoints,
            travel_mode: "DRIVING".to_string(),
        }
    }

    #[test]
    fn test_query_params_with_waypoints() {
        let client = GoogleDirectionsClient::new(DEFAULT_DIRECTIONS_URL, "secret", Duration::from_secs(5)).unwrap();
        let params = client.query_params(&request(vec![
            LatLng { lat: 35.1, lng: 139.1 },
            LatLng { lat: 35.15, lng: 139.15 },
        ]));

        assert!(params.contains(&("origin", "35,139".to_string())));
        assert!(params.contains(&("destination", "35.2,139.2".to_string())));
        assert!(params.contains(&("mode", "driving".to_string())));
        assert!(params.contains(&("waypoints", "optimize:true|35.1,139.1|35.15,139.15".to_string())));
        assert!(params.contains(&("key", "secret".to_string())));
    }

    #[test]
    fn test_query_params_without_waypoints() {
        let client = GoogleDirectionsClient::new(DEFAULT_DIRECTIONS_URL, "secret", Duration::from_secs(5)).unwrap();
        let params = client.query_params(&request(vec![]));
        assert!(params.iter().all(|(name, _)| *name != "waypoints"));
    }
}
