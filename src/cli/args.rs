//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::domain::Rol;

/// CRM Inmobiliario - advisors, clients and property listings
#[derive(Parser, Debug)]
#[command(name = "crm-inmobiliario")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the read-only property API
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage advisor accounts
    User(UserArgs),
}

/// Arguments for the serve command. Unset values come from the environment.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the user command
#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub action: UserAction,
}

/// Account actions
#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// Create an advisor account on the configured backend
    Create {
        #[arg(long)]
        username: String,

        #[arg(long, env = "CRM_USER_PASSWORD", hide_env_values = true)]
        password: String,

        /// `admin` or `asesor`
        #[arg(long, default_value = "asesor", value_parser = parse_rol)]
        rol: Rol,

        #[arg(long)]
        nombres: Option<String>,

        #[arg(long)]
        apellidos: Option<String>,
    },
}

fn parse_rol(value: &str) -> Result<Rol, String> {
    if crate::config::is_valid_role(value) {
        Ok(Rol::from(value))
    } else {
        Err(format!("unknown role '{}'", value))
    }
}
