//! Client service - validated saves, CURP dedup and client queries.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{Cliente, ClienteFilter, ClientePatch, Query};
use crate::errors::{AppError, AppResult};
use crate::infra::Repository;
use crate::types::{Paginated, PaginationParams};

/// Client service trait for dependency injection.
#[async_trait]
pub trait ClienteService: Send + Sync {
    async fn obtener_cliente(&self, id: i32) -> AppResult<Option<Cliente>>;

    /// Case-insensitive CURP lookup. Blank input finds nothing.
    async fn find_by_curp(&self, curp: String) -> AppResult<Option<Cliente>>;

    /// Validate and upsert. Rejects a CURP already used by another client.
    async fn guardar_cliente(&self, patch: ClientePatch) -> AppResult<Cliente>;

    /// Permanent delete. `false` when the id does not exist.
    async fn eliminar_cliente(&self, id: i32) -> AppResult<bool>;

    async fn listar_clientes(
        &self,
        filter: ClienteFilter,
        page: PaginationParams,
    ) -> AppResult<Vec<Cliente>>;

    async fn buscar_clientes(
        &self,
        text: String,
        filter: ClienteFilter,
        page: PaginationParams,
    ) -> AppResult<Vec<Cliente>>;

    async fn contar_clientes(&self, query: Query<ClienteFilter>) -> AppResult<u64>;

    async fn pagina_clientes(
        &self,
        query: Query<ClienteFilter>,
        page: PaginationParams,
    ) -> AppResult<Paginated<Cliente>>;
}

/// Concrete implementation of ClienteService.
pub struct ClienteManager {
    clientes: Arc<dyn Repository<Cliente>>,
}

impl ClienteManager {
    pub fn new(clientes: Arc<dyn Repository<Cliente>>) -> Self {
        Self { clientes }
    }

    async fn ensure_curp_free(&self, patch: &ClientePatch) -> AppResult<()> {
        let Some(Some(curp)) = patch.curp.as_ref() else {
            return Ok(());
        };
        match self.find_by_curp(curp.clone()).await? {
            Some(existing) if Some(existing.id) != patch.id => {
                tracing::warn!(existing_id = existing.id, "Rejected duplicate CURP");
                Err(AppError::conflict("CURP"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ClienteService for ClienteManager {
    async fn obtener_cliente(&self, id: i32) -> AppResult<Option<Cliente>> {
        self.clientes.find_by_id(id).await
    }

    async fn find_by_curp(&self, curp: String) -> AppResult<Option<Cliente>> {
        let curp = curp.trim();
        if curp.is_empty() {
            return Ok(None);
        }
        let query = Query::filtered(ClienteFilter {
            curp: Some(curp.to_string()),
            ..Default::default()
        });
        let found = self
            .clientes
            .list(&query, PaginationParams::new(1, 1))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn guardar_cliente(&self, mut patch: ClientePatch) -> AppResult<Cliente> {
        patch.validate_contact()?;
        patch.derive_age(Utc::now().date_naive());
        self.ensure_curp_free(&patch).await?;

        let saved = self.clientes.save(patch).await?;
        tracing::info!(cliente_id = saved.id, "Client saved");
        Ok(saved)
    }

    async fn eliminar_cliente(&self, id: i32) -> AppResult<bool> {
        let deleted = self.clientes.delete(id).await?;
        if deleted {
            tracing::info!(cliente_id = id, "Client deleted");
        }
        Ok(deleted)
    }

    async fn listar_clientes(
        &self,
        filter: ClienteFilter,
        page: PaginationParams,
    ) -> AppResult<Vec<Cliente>> {
        self.clientes.list(&Query::filtered(filter), page).await
    }

    async fn buscar_clientes(
        &self,
        text: String,
        filter: ClienteFilter,
        page: PaginationParams,
    ) -> AppResult<Vec<Cliente>> {
        self.clientes.list(&Query::search(text, filter), page).await
    }

    async fn contar_clientes(&self, query: Query<ClienteFilter>) -> AppResult<u64> {
        self.clientes.count(&query).await
    }

    async fn pagina_clientes(
        &self,
        query: Query<ClienteFilter>,
        page: PaginationParams,
    ) -> AppResult<Paginated<Cliente>> {
        self.clientes.page(&query, page).await
    }
}
