//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the read-only property API
//! - `migrate` - Database migrations
//! - `user create` - Bootstrap an advisor account

pub mod args;

pub use args::{Cli, Commands};
