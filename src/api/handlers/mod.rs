//! HTTP request handlers.

pub mod health;
pub mod properties;

pub use health::health_routes;
pub use properties::property_routes;
