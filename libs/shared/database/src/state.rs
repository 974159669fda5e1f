use std::sync::Arc;

use shared_config::AppConfig;

use crate::memory::MemoryStore;
use crate::store::ClinicStore;
use crate::supabase::SupabaseStore;

/// Shared router state: the store behind every cell.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClinicStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Database-backed when configured, in-memory otherwise.
    pub fn from_config(config: &AppConfig) -> Self {
        if config.is_configured() {
            Self::new(Arc::new(SupabaseStore::new(config)))
        } else {
            Self::new(Arc::new(MemoryStore::new()))
        }
    }
}
