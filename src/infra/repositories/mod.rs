//! Repository layer - Data access abstraction
//!
//! One capability trait, [`Repository`], with a SQL implementation and a
//! flat JSON file implementation. Both are generic over the record type.

mod base;
pub(crate) mod entities;
mod json_file;
pub(crate) mod sql;

pub use base::Repository;
pub use json_file::JsonFileRepository;
pub use sql::{SqlRecord, SqlRepository};
