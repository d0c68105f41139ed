//! Application state for the read API.

use std::sync::Arc;

use crate::infra::Persistence;
use crate::services::{PropiedadManager, PropiedadService};

/// Services the read API depends on.
#[derive(Clone)]
pub struct AppState {
    pub propiedades: Arc<dyn PropiedadService>,
}

impl AppState {
    pub fn new(propiedades: Arc<dyn PropiedadService>) -> Self {
        Self { propiedades }
    }

    /// Serve the property repository of the given backend.
    pub fn from_persistence(persistence: &Persistence) -> Self {
        Self::new(Arc::new(PropiedadManager::new(
            persistence.propiedades.clone(),
        )))
    }
}
