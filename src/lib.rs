//! CRM Inmobiliario - real-estate CRM core
//!
//! Advisors, clients and property listings over interchangeable storage
//! backends (SQL through SeaORM, or JSON files), with session-based
//! permissions and a read-only property API.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Records, patches, filters and validation
//! - **services**: Auth session and the query facade per collection
//! - **infra**: Repositories, database connection and migrations
//! - **api**: Read-only HTTP handlers and routes
//! - **types**: Shared types (pagination)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the property API
//! crm-inmobiliario serve
//!
//! # Run migrations
//! crm-inmobiliario migrate up
//!
//! # Seed the first admin
//! crm-inmobiliario user create --username admin --password 'S3guro!' --rol admin
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::Password;
pub use errors::{AppError, AppResult};
pub use infra::Persistence;
