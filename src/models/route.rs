//! Modelo de Route
//!
//! Una ruta es un valor derivado y cacheable: describe el orden de visita
//! calculado para las ubicaciones de una lista y sus métricas agregadas.
//! Distancias en metros y duraciones en segundos.

use serde::{Deserialize, Serialize};

use super::{ListId, LocationId};
use crate::utils::format::{format_distance, format_duration};

/// Tramo entre dos ubicaciones consecutivas de la ruta
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub start_location_id: LocationId,
    pub end_location_id: LocationId,
    pub distance: u64,
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub list_id: ListId,
    pub optimized_order: Vec<LocationId>,
    pub total_distance: u64,
    pub total_duration: u64,
    pub legs: Vec<RouteLeg>,
}

impl Route {
    /// Verificar que el orden optimizado contiene exactamente los ids dados
    pub fn matches_locations(&self, location_ids: &[LocationId]) -> bool {
        let mut expected = location_ids.to_vec();
        let mut actual = self.optimized_order.clone();
        expected.sort();
        actual.sort();
        expected == actual
    }

    pub fn formatted_distance(&self) -> String {
        format_distance(self.total_distance)
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(self.total_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(order: &[i64]) -> Route {
        Route {
            list_id: ListId(1),
            optimized_order: order.iter().copied().map(LocationId).collect(),
            total_distance: 1500,
            total_duration: 4000,
            legs: vec![],
        }
    }

    #[test]
    fn test_matches_locations_ignores_order() {
        let ids = [LocationId(1), LocationId(2), LocationId(3)];
        assert!(route(&[1, 3, 2]).matches_locations(&ids));
        assert!(!route(&[1, 3]).matches_locations(&ids));
        assert!(!route(&[1, 3, 3]).matches_locations(&ids));
    }

    #[test]
    fn test_formatting_is_boundary_only() {
        let r = route(&[1, 2]);
        assert_eq!(r.formatted_distance(), "1.5 km");
        assert_eq!(r.formatted_duration(), "1 h 6 min");
        assert_eq!(r.total_distance, 1500);
    }
}
