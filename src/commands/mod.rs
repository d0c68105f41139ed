//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod migrate;
pub mod serve;
pub mod user;

use crate::config::{Backend, Config};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};

/// Open the repositories of the configured backend.
pub(crate) async fn open_backend(backend: Backend, config: &Config) -> AppResult<Persistence> {
    match backend {
        Backend::Sql => {
            let db = Database::connect(&config.database_url).await?;
            Ok(Persistence::sql(db.get_connection()))
        }
        Backend::Json => Ok(Persistence::json(&config.data_dir)),
    }
}
