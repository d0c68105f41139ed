//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models. Each
//! module also maps its domain record onto the table via `SqlRecord`.

pub mod asesor;
pub mod cliente;
pub mod propiedad;
