//! Authentication service - login, session state and password lifecycle.
//!
//! One `Authenticator` is built per process and shared. It holds the single
//! session slot: `login` fills it, `logout` clears it, and every permission
//! check reads it.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{
    Asesor, AsesorFilter, AsesorPatch, LoginFailure, LoginOutcome, Password, PasswordChange,
    PublicProfile, Query, Rol, Session,
};
use crate::errors::{AppError, AppResult};
use crate::infra::Repository;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account creation request.
///
/// `perfil` carries the optional profile fields; its username and password
/// hash are ignored.
#[derive(Clone, Default)]
pub struct NuevoAsesor {
    pub username: String,
    pub password: String,
    pub perfil: AsesorPatch,
}

impl NuevoAsesor {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            perfil: AsesorPatch::default(),
        }
    }

    pub fn with_rol(mut self, rol: Rol) -> Self {
        self.perfil.rol = Some(rol);
        self
    }
}

impl std::fmt::Debug for NuevoAsesor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NuevoAsesor")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("perfil", &self.perfil)
            .finish()
    }
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and open a session. Failures are reported in the
    /// outcome and leave the current session untouched.
    async fn login(&self, username: String, password: String) -> LoginOutcome;

    fn logout(&self);

    fn current_user(&self) -> Option<Session>;

    /// True when the session role is admin.
    fn is_admin(&self) -> bool;

    /// Must-change flag of the current session; false when signed out.
    fn requiere_cambio_password(&self) -> bool;

    /// Change a password and clear the must-change flag.
    async fn cambiar_password(&self, change: PasswordChange) -> AppResult<()>;

    /// Admin only. Sets a temporary password and forces a change on next use.
    async fn resetear_password(&self, asesor_id: i32, new_password: String) -> AppResult<()>;

    /// Create an account and return its id.
    async fn crear_usuario(&self, nuevo: NuevoAsesor) -> AppResult<i32>;
}

/// Concrete implementation of AuthService over any advisor repository.
pub struct Authenticator {
    asesores: Arc<dyn Repository<Asesor>>,
    session: RwLock<Option<Session>>,
}

impl Authenticator {
    pub fn new(asesores: Arc<dyn Repository<Asesor>>) -> Self {
        Self {
            asesores,
            session: RwLock::new(None),
        }
    }

    fn session(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.session.read().unwrap_or_else(|e| e.into_inner())
    }

    fn session_mut(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.session.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Session must exist and be an admin.
    fn require_admin(&self) -> AppResult<()> {
        match self.session().as_ref() {
            None => Err(AppError::Unauthorized),
            Some(s) if s.is_admin() => Ok(()),
            Some(_) => Err(AppError::Forbidden),
        }
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Asesor>> {
        let query = Query::filtered(AsesorFilter::by_username(username));
        let found = self
            .asesores
            .list(&query, PaginationParams::new(1, 1))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn store_password(
        &self,
        asesor_id: i32,
        password: Password,
        requiere_cambio: bool,
    ) -> AppResult<()> {
        self.asesores
            .save(AsesorPatch {
                id: Some(asesor_id),
                password_hash: Some(password.into_string()),
                requiere_cambio_password: Some(requiere_cambio),
                ..Default::default()
            })
            .await?;
        Ok(())
    }

    /// Keep the session flag in step with storage.
    fn clear_session_flag(&self, asesor_id: i32) {
        if let Some(session) = self.session_mut().as_mut() {
            if session.id == asesor_id {
                session.requiere_cambio_password = false;
            }
        }
    }

    async fn try_login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let asesor = match self.find_by_username(username).await? {
            Some(asesor) if asesor.activo => asesor,
            _ => {
                tracing::warn!(username, "Login refused: unknown or inactive account");
                return Ok(LoginOutcome::Failure(LoginFailure::NotFoundOrInactive));
            }
        };

        let stored = Password::from_hash(asesor.password_hash.as_str());
        if !stored.verify(password) {
            tracing::warn!(username, "Login refused: invalid credentials");
            return Ok(LoginOutcome::Failure(LoginFailure::InvalidCredentials));
        }

        // Bcrypt hashes are upgraded along with the access stamp.
        let upgraded = if stored.is_legacy() {
            match Password::new(password) {
                Ok(hash) => Some(hash.into_string()),
                Err(e) => {
                    tracing::warn!(asesor_id = asesor.id, "Could not upgrade legacy hash: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let touch = AsesorPatch {
            id: Some(asesor.id),
            password_hash: upgraded,
            ultimo_acceso: Some(Some(Utc::now())),
            ..Default::default()
        };
        if let Err(e) = self.asesores.save(touch).await {
            tracing::warn!(asesor_id = asesor.id, "Could not update last access: {}", e);
        }

        let session = Session::from(&asesor);
        let profile = PublicProfile {
            username: session.username.clone(),
            role: session.rol,
        };
        *self.session_mut() = Some(session);

        tracing::info!(username, rol = %profile.role, "Login succeeded");
        Ok(LoginOutcome::Success(profile))
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, username: String, password: String) -> LoginOutcome {
        match self.try_login(&username, &password).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(username = %username, "Login failed unexpectedly: {}", e);
                LoginOutcome::Failure(LoginFailure::Unexpected)
            }
        }
    }

    fn logout(&self) {
        if let Some(session) = self.session_mut().take() {
            tracing::info!(username = %session.username, "Logged out");
        }
    }

    fn current_user(&self) -> Option<Session> {
        self.session().clone()
    }

    fn is_admin(&self) -> bool {
        self.session().as_ref().is_some_and(Session::is_admin)
    }

    fn requiere_cambio_password(&self) -> bool {
        self.session()
            .as_ref()
            .is_some_and(|s| s.requiere_cambio_password)
    }

    async fn cambiar_password(&self, change: PasswordChange) -> AppResult<()> {
        match change {
            PasswordChange::Forced {
                username,
                new_password,
            } => {
                let session = self.current_user().ok_or(AppError::Unauthorized)?;
                if session.username != username || !session.requiere_cambio_password {
                    return Err(AppError::Forbidden);
                }
                Password::check_strength(&new_password)?;
                self.store_password(session.id, Password::new(&new_password)?, false)
                    .await?;
                self.clear_session_flag(session.id);
                tracing::info!(username = %username, "Forced password change completed");
            }
            PasswordChange::WithCurrent {
                asesor_id,
                current,
                new_password,
            } => {
                let asesor = self
                    .asesores
                    .find_by_id(asesor_id)
                    .await?
                    .ok_or_else(|| AppError::validation("Advisor does not exist"))?;
                if !Password::from_hash(asesor.password_hash).verify(&current) {
                    return Err(AppError::validation("Current password is incorrect"));
                }
                Password::check_strength(&new_password)?;
                self.store_password(asesor_id, Password::new(&new_password)?, false)
                    .await?;
                self.clear_session_flag(asesor_id);
                tracing::info!(asesor_id, "Password changed");
            }
        }
        Ok(())
    }

    async fn resetear_password(&self, asesor_id: i32, new_password: String) -> AppResult<()> {
        self.require_admin()?;
        if new_password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }
        self.store_password(asesor_id, Password::new(&new_password)?, true)
            .await?;
        tracing::info!(asesor_id, "Password reset; change required on next login");
        Ok(())
    }

    async fn crear_usuario(&self, nuevo: NuevoAsesor) -> AppResult<i32> {
        let username = nuevo.username.trim();
        if username.is_empty() || nuevo.password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }
        if self.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }
        nuevo.perfil.validate_contact()?;

        let perfil = nuevo.perfil;
        let patch = AsesorPatch {
            id: None,
            username: Some(username.to_string()),
            password_hash: Some(Password::new(&nuevo.password)?.into_string()),
            rol: Some(perfil.rol.unwrap_or_default()),
            activo: Some(perfil.activo.unwrap_or(true)),
            requiere_cambio_password: Some(perfil.requiere_cambio_password.unwrap_or(false)),
            ultimo_acceso: None,
            ..perfil
        };

        let created = self.asesores.save(patch).await?;
        tracing::info!(asesor_id = created.id, username, "Account created");
        Ok(created.id)
    }
}
