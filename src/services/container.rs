//! Service Container - Centralized service access.
//!
//! Built once at startup from a [`Persistence`] bundle. The auth service is
//! shared, so every manager sees the same session.

use std::sync::Arc;

use super::{
    AsesorManager, AsesorService, AuthService, Authenticator, ClienteManager, ClienteService,
    PropiedadManager, PropiedadService,
};
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn asesores(&self) -> Arc<dyn AsesorService>;

    fn clientes(&self) -> Arc<dyn ClienteService>;

    fn propiedades(&self) -> Arc<dyn PropiedadService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    asesor_service: Arc<dyn AsesorService>,
    cliente_service: Arc<dyn ClienteService>,
    propiedad_service: Arc<dyn PropiedadService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        asesor_service: Arc<dyn AsesorService>,
        cliente_service: Arc<dyn ClienteService>,
        propiedad_service: Arc<dyn PropiedadService>,
    ) -> Self {
        Self {
            auth_service,
            asesor_service,
            cliente_service,
            propiedad_service,
        }
    }

    /// Wire every service onto one backend.
    pub fn from_persistence(persistence: Persistence) -> Self {
        let auth_service: Arc<dyn AuthService> =
            Arc::new(Authenticator::new(persistence.asesores.clone()));
        let asesor_service = Arc::new(AsesorManager::new(
            persistence.asesores,
            auth_service.clone(),
        ));
        let cliente_service = Arc::new(ClienteManager::new(persistence.clientes));
        let propiedad_service = Arc::new(PropiedadManager::new(persistence.propiedades));

        Self::new(
            auth_service,
            asesor_service,
            cliente_service,
            propiedad_service,
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn asesores(&self) -> Arc<dyn AsesorService> {
        self.asesor_service.clone()
    }

    fn clientes(&self) -> Arc<dyn ClienteService> {
        self.cliente_service.clone()
    }

    fn propiedades(&self) -> Arc<dyn PropiedadService> {
        self.propiedad_service.clone()
    }
}
