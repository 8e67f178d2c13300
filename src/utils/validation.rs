//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de listas, ubicaciones y permutaciones de identificadores.

use std::collections::HashSet;
use std::hash::Hash;
use validator::ValidationError;

use crate::models::LocationDraft;
use crate::utils::errors::{validation_error, AppResult};

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar rango de coordenadas de un borrador de ubicación
pub fn validate_coordinates(draft: &LocationDraft) -> Result<(), ValidationError> {
    let lat_ok = draft.lat.is_finite() && (-90.0..=90.0).contains(&draft.lat);
    let lng_ok = draft.lng.is_finite() && (-180.0..=180.0).contains(&draft.lng);
    if !lat_ok || !lng_ok {
        let mut error = ValidationError::new("coordinates");
        error.add_param("lat".into(), &draft.lat);
        error.add_param("lng".into(), &draft.lng);
        return Err(error);
    }
    Ok(())
}

/// Validar el nombre de una lista (no vacío ni solo espacios)
pub fn validate_list_name(name: &str) -> AppResult<()> {
    validate_not_empty(name).map_err(|_| validation_error("list name must not be empty"))
}

/// Validar que `candidate` sea exactamente una permutación de `current`
///
/// Rechaza ids faltantes, ids extra (ajenos) y duplicados.
pub fn validate_permutation<T>(current: &[T], candidate: &[T]) -> AppResult<()>
where
    T: Eq + Hash + std::fmt::Debug,
{
    let mut seen = HashSet::with_capacity(candidate.len());
    for id in candidate {
        if !seen.insert(id) {
            return Err(validation_error(format!("duplicate id {:?} in new order", id)));
        }
    }

    let expected: HashSet<&T> = current.iter().collect();
    if let Some(foreign) = candidate.iter().find(|id| !expected.contains(id)) {
        return Err(validation_error(format!("id {:?} does not belong to the list", foreign)));
    }
    if let Some(missing) = current.iter().find(|id| !seen.contains(id)) {
        return Err(validation_error(format!("id {:?} is missing from new order", missing)));
    }

    Ok(())
}

/// Validar que `order` sea una permutación de `0..len`
pub fn is_index_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
