//! Advisor service - advisor profiles with role-based permissions.

use async_trait::async_trait;
use std::sync::Arc;

use super::auth_service::{AuthService, NuevoAsesor};
use crate::domain::{Asesor, AsesorFilter, AsesorPatch, Patch, Query};
use crate::errors::{AppError, AppResult};
use crate::infra::Repository;
use crate::types::PaginationParams;

/// Advisor service trait for dependency injection.
#[async_trait]
pub trait AsesorService: Send + Sync {
    async fn obtener_asesor(&self, id: i32) -> AppResult<Option<Asesor>>;

    async fn listar_asesores(
        &self,
        query: Query<AsesorFilter>,
        page: PaginationParams,
    ) -> AppResult<Vec<Asesor>>;

    async fn contar_asesores(&self, query: Query<AsesorFilter>) -> AppResult<u64>;

    /// True when no other advisor uses `username`. Blank names are never unique.
    async fn validar_username_unico(
        &self,
        username: String,
        excluir_id: Option<i32>,
    ) -> AppResult<bool>;

    /// Admin only.
    async fn crear_asesor(&self, nuevo: NuevoAsesor) -> AppResult<i32>;

    /// Admin, or the advisor editing their own profile. Only an admin may
    /// change a role.
    async fn editar_asesor(&self, id: i32, patch: AsesorPatch) -> AppResult<Asesor>;

    /// Soft delete. Admin, or the advisor themself.
    async fn eliminar_asesor(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of AsesorService.
pub struct AsesorManager {
    asesores: Arc<dyn Repository<Asesor>>,
    auth: Arc<dyn AuthService>,
}

impl AsesorManager {
    pub fn new(asesores: Arc<dyn Repository<Asesor>>, auth: Arc<dyn AuthService>) -> Self {
        Self { asesores, auth }
    }

    fn require_admin(&self) -> AppResult<()> {
        if self.auth.current_user().is_none() {
            return Err(AppError::Unauthorized);
        }
        if !self.auth.is_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }

    fn require_admin_or_self(&self, asesor_id: i32) -> AppResult<()> {
        let session = self.auth.current_user().ok_or(AppError::Unauthorized)?;
        if self.auth.is_admin() || session.id == asesor_id {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl AsesorService for AsesorManager {
    async fn obtener_asesor(&self, id: i32) -> AppResult<Option<Asesor>> {
        self.asesores.find_by_id(id).await
    }

    async fn listar_asesores(
        &self,
        query: Query<AsesorFilter>,
        page: PaginationParams,
    ) -> AppResult<Vec<Asesor>> {
        self.asesores.list(&query, page).await
    }

    async fn contar_asesores(&self, query: Query<AsesorFilter>) -> AppResult<u64> {
        self.asesores.count(&query).await
    }

    async fn validar_username_unico(
        &self,
        username: String,
        excluir_id: Option<i32>,
    ) -> AppResult<bool> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(false);
        }
        let query = Query::filtered(AsesorFilter::by_username(username));
        let taken = self
            .asesores
            .list(&query, PaginationParams::default())
            .await?
            .into_iter()
            .any(|a| Some(a.id) != excluir_id);
        Ok(!taken)
    }

    async fn crear_asesor(&self, nuevo: NuevoAsesor) -> AppResult<i32> {
        self.require_admin()?;
        self.auth.crear_usuario(nuevo).await
    }

    async fn editar_asesor(&self, id: i32, mut patch: AsesorPatch) -> AppResult<Asesor> {
        self.require_admin_or_self(id)?;
        patch.id = Some(id);
        // Credentials and access stamps only change through the auth service.
        patch.password_hash = None;
        patch.ultimo_acceso = None;

        if patch.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        // Role, activation and the forced-change flag are admin-only.
        let privileged = patch.rol.is_some()
            || patch.activo.is_some()
            || patch.requiere_cambio_password.is_some();
        if privileged && !self.auth.is_admin() {
            return Err(AppError::Forbidden);
        }
        if let Some(username) = patch.username.as_mut() {
            *username = username.trim().to_string();
            if username.is_empty() {
                return Err(AppError::validation("Username cannot be empty"));
            }
            if !self
                .validar_username_unico(username.clone(), Some(id))
                .await?
            {
                return Err(AppError::conflict("Username"));
            }
        }
        patch.validate_contact()?;

        let updated = self.asesores.save(patch).await?;
        tracing::info!(asesor_id = id, "Advisor updated");
        Ok(updated)
    }

    async fn eliminar_asesor(&self, id: i32) -> AppResult<bool> {
        self.require_admin_or_self(id)?;
        let deleted = self.asesores.delete(id).await?;
        if deleted {
            tracing::info!(asesor_id = id, "Advisor deactivated");
        }
        Ok(deleted)
    }
}
