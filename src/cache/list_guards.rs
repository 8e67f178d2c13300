use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::models::ListId;

/// Candados por lista para serializar operaciones sobre la misma lista
///
/// Operaciones sobre listas distintas no se bloquean entre sí.
#[derive(Clone, Default)]
pub struct ListGuards {
    guards: Arc<Mutex<HashMap<ListId, Arc<Mutex<()>>>>>,
}

impl ListGuards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Esperar turno para operar sobre la lista
    pub async fn acquire(&self, list_id: ListId) -> OwnedMutexGuard<()> {
        let guard = {
            let mut guards = self.guards.lock().await;
            guards.entry(list_id).or_default().clone()
        };
        debug!("🔒 Esperando turno para lista {}", list_id);
        guard.lock_owned().await
    }

    /// Olvidar el candado de una lista eliminada
    ///
    /// Si alguien más tiene o espera el candado, la entrada se conserva.
    pub async fn forget(&self, list_id: ListId) {
        let mut guards = self.guards.lock().await;
        let idle = guards
            .get(&list_id)
            .map(|guard| Arc::strong_count(guard) == 1)
            .unwrap_or(false);
        if idle {
            guards.remove(&list_id);
        }
    }

    #[cfg(test)]
    pub(crate) async fn tracked(&self) -> usize {
        self.guards.lock().await.len()
    }

    pub async fn clear(&self) {
        self.guards.lock().await.clear();
    }
}
