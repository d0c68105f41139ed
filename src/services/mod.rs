//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and repositories. They depend on the
//! `Repository` capability, never on a concrete backend.

mod asesor_service;
mod auth_service;
mod cliente_service;
pub mod container;
mod propiedad_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use asesor_service::{AsesorManager, AsesorService};
pub use auth_service::{AuthService, Authenticator, NuevoAsesor};
pub use cliente_service::{ClienteManager, ClienteService};
pub use propiedad_service::{PropiedadManager, PropiedadService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
