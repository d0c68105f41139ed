//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 500;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Advisor Roles
// =============================================================================

/// Default role assigned to new advisors
pub const ROLE_ASESOR: &str = "asesor";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_ASESOR, ROLE_ADMIN];

/// Check if a role value is valid (case-insensitive)
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.iter().any(|r| r.eq_ignore_ascii_case(role.trim()))
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

// =============================================================================
// Database
// =============================================================================

pub const DEFAULT_DB_HOST: &str = "127.0.0.1";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_NAME: &str = "CRM";

// =============================================================================
// JSON document stores
// =============================================================================

/// Default directory holding the JSON stores
pub const DEFAULT_DATA_DIR: &str = "database/seeds";

pub const CLIENTES_STORE_FILE: &str = "clientes_store.json";
pub const PROPIEDADES_STORE_FILE: &str = "propiedades_store.json";
pub const ASESORES_STORE_FILE: &str = "asesores_store.json";

// =============================================================================
// Validation
// =============================================================================

/// Minimum length for a password chosen by the advisor
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Exact length of a CURP
pub const CURP_LENGTH: u64 = 18;

/// Exact number of digits of a phone number
pub const PHONE_DIGITS: usize = 10;

/// Values the lenient text parser treats as absent
pub const NULL_LIKE_TEXT: &[&str] = &["none", "null"];

/// Free-text values read as `true`
pub const TRUTHY_TEXT: &[&str] = &["si", "sí", "true", "1", "y", "yes"];

/// Free-text values read as `false`
pub const FALSY_TEXT: &[&str] = &["no", "false", "0", "n"];
