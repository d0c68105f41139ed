//! Backend selection.
//!
//! Chooses one storage backend at startup and hands out the three
//! repositories as trait objects. Nothing downstream knows which backend
//! is active.

use sea_orm::DatabaseConnection;
use std::path::Path;
use std::sync::Arc;

use super::repositories::{JsonFileRepository, Repository, SqlRepository};
use crate::config::{ASESORES_STORE_FILE, CLIENTES_STORE_FILE, PROPIEDADES_STORE_FILE};
use crate::domain::{Asesor, Cliente, Propiedad};

/// The repositories of one backend
#[derive(Clone)]
pub struct Persistence {
    pub clientes: Arc<dyn Repository<Cliente>>,
    pub propiedades: Arc<dyn Repository<Propiedad>>,
    pub asesores: Arc<dyn Repository<Asesor>>,
}

impl Persistence {
    /// SeaORM-backed repositories sharing one connection pool.
    pub fn sql(db: DatabaseConnection) -> Self {
        Self {
            clientes: Arc::new(SqlRepository::<Cliente>::new(db.clone())),
            propiedades: Arc::new(SqlRepository::<Propiedad>::new(db.clone())),
            asesores: Arc::new(SqlRepository::<Asesor>::new(db)),
        }
    }

    /// JSON stores under `dir`, one file per collection.
    pub fn json(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        tracing::debug!(dir = %dir.display(), "Using JSON file stores");
        Self {
            clientes: Arc::new(JsonFileRepository::<Cliente>::new(
                dir.join(CLIENTES_STORE_FILE),
            )),
            propiedades: Arc::new(JsonFileRepository::<Propiedad>::new(
                dir.join(PROPIEDADES_STORE_FILE),
            )),
            asesores: Arc::new(JsonFileRepository::<Asesor>::new(
                dir.join(ASESORES_STORE_FILE),
            )),
        }
    }
}
