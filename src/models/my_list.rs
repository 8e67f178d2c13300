//! Modelo de MyList
//!
//! Una colección nombrada y ordenada de ubicaciones.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::location::{Location, LocationId};

/// Identificador de lista asignado por el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub i64);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyList {
    pub id: ListId,
    pub name: String,
    pub description: String,
    pub locations: Vec<Location>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MyList {
    /// Ids de las ubicaciones en el orden actual de la lista
    pub fn location_ids(&self) -> Vec<LocationId> {
        self.locations.iter().map(|loc| loc.id).collect()
    }

    pub fn contains_location(&self, location_id: LocationId) -> bool {
        self.locations.iter().any(|loc| loc.id == location_id)
    }

    /// Avanzar `updated_at` estrictamente
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Cambios de metadatos de una lista (campos ausentes no se modifican)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ListUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            name: None,
            description: Some(description.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
