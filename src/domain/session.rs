//! In-memory session and login outcome types.

use serde::Serialize;

use super::asesor::{Asesor, Rol};

/// Identity of the advisor currently signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: i32,
    pub username: String,
    pub rol: Rol,
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub requiere_cambio_password: bool,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.rol.is_admin()
    }
}

impl From<&Asesor> for Session {
    fn from(asesor: &Asesor) -> Self {
        Self {
            id: asesor.id,
            username: asesor.username.clone(),
            rol: asesor.rol,
            nombres: asesor.nombres.clone(),
            apellidos: asesor.apellidos.clone(),
            requiere_cambio_password: asesor.requiere_cambio_password,
        }
    }
}

/// Redacted profile handed back after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicProfile {
    pub username: String,
    pub role: Rol,
}

/// Why a login attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    NotFoundOrInactive,
    InvalidCredentials,
    Unexpected,
}

impl LoginFailure {
    pub fn message(&self) -> &'static str {
        match self {
            LoginFailure::NotFoundOrInactive => "User not found or inactive.",
            LoginFailure::InvalidCredentials => "Invalid username or password.",
            LoginFailure::Unexpected => "Unexpected error while authenticating.",
        }
    }
}

impl std::fmt::Display for LoginFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a login attempt. Failures are outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(PublicProfile),
    Failure(LoginFailure),
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success(_))
    }

    pub fn profile(&self) -> Option<&PublicProfile> {
        match self {
            LoginOutcome::Success(profile) => Some(profile),
            LoginOutcome::Failure(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            LoginOutcome::Success(_) => None,
            LoginOutcome::Failure(reason) => Some(reason.message()),
        }
    }
}

/// The two ways an advisor can change a password.
#[derive(Debug, Clone)]
pub enum PasswordChange {
    /// First-login change for the signed-in advisor whose must-change flag
    /// is set. No current password is asked for.
    Forced {
        username: String,
        new_password: String,
    },
    /// Voluntary change, verified against the stored hash.
    WithCurrent {
        asesor_id: i32,
        current: String,
        new_password: String,
    },
}
