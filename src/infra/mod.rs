//! Infrastructure layer - External systems integration
//!
//! Database connection and migrations, the repository implementations and
//! the backend selection.

pub mod db;
pub mod persistence;
pub mod repositories;

pub use db::{Database, Migrator};
pub use persistence::Persistence;
pub use repositories::{JsonFileRepository, Repository, SqlRecord, SqlRepository};
