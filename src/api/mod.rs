//! API layer - read-only HTTP surface
//!
//! Exposes property listings and a liveness check. Writes go through the
//! services directly, never through HTTP.

pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
