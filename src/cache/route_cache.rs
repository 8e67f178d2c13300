use std::collections::HashMap;
use tracing::debug;

use crate::models::{ListId, Route};

/// Cache de rutas calculadas, a lo sumo una por lista
///
/// Sin TTL: una entrada solo deja de ser válida cuando la secuencia de
/// ubicaciones de su lista cambia, y quien muta la lista debe invalidarla.
#[derive(Debug, Clone, Default)]
pub struct RouteCache {
    entries: HashMap<ListId, Route>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lectura pura, nunca calcula
    pub fn get(&self, list_id: ListId) -> Option<&Route> {
        let entry = self.entries.get(&list_id);
        match entry {
            Some(_) => debug!("📥 Route cache HIT para lista {}", list_id),
            None => debug!("❌ Route cache MISS para lista {}", list_id),
        }
        entry
    }

    /// Sobrescribe incondicionalmente la ruta de la lista
    pub fn set(&mut self, list_id: ListId, route: Route) {
        debug!(
            "💾 Route cache SET para lista {} ({} paradas)",
            list_id,
            route.optimized_order.len()
        );
        self.entries.insert(list_id, route);
    }

    /// Elimina la entrada si existe; idempotente
    pub fn invalidate(&mut self, list_id: ListId) -> bool {
        let removed = self.entries.remove(&list_id).is_some();
        if removed {
            debug!("🗑️ Route cache INVALIDATE para lista {}", list_id);
        }
        removed
    }

    /// Conserva solo las entradas que cumplen el predicado
    pub fn retain(&mut self, mut keep: impl FnMut(ListId, &Route) -> bool) {
        self.entries.retain(|list_id, route| keep(*list_id, route));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
