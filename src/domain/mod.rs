//! Domain layer - records, allow-lists and business rules
//!
//! Independent of the storage backend. The repositories in `infra` store
//! anything implementing [`Record`].

pub mod asesor;
pub mod cliente;
pub mod contact;
pub mod lenient;
pub mod password;
pub mod propiedad;
pub mod record;
pub mod session;

pub use asesor::{Asesor, AsesorFilter, AsesorPatch, AsesorResponse, Rol};
pub use cliente::{calcular_score, Cliente, ClienteFilter, ClientePatch};
pub use password::Password;
pub use propiedad::{Propiedad, PropiedadFilter, PropiedadPatch, PropertyResponse};
pub use record::{DeleteMode, Patch, Query, Record};
pub use session::{LoginFailure, LoginOutcome, PasswordChange, PublicProfile, Session};
