//! Property service - listing maintenance and property queries.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Propiedad, PropiedadFilter, PropiedadPatch, Query};
use crate::errors::AppResult;
use crate::infra::Repository;
use crate::types::{Paginated, PaginationParams};

/// Property service trait for dependency injection.
#[async_trait]
pub trait PropiedadService: Send + Sync {
    async fn obtener_propiedad(&self, id: i32) -> AppResult<Option<Propiedad>>;

    async fn guardar_propiedad(&self, patch: PropiedadPatch) -> AppResult<Propiedad>;

    /// Soft delete: the listing stays retrievable with `activo = false`.
    async fn eliminar_propiedad(&self, id: i32) -> AppResult<bool>;

    async fn listar_propiedades(
        &self,
        filter: PropiedadFilter,
        page: PaginationParams,
    ) -> AppResult<Vec<Propiedad>>;

    async fn buscar_propiedades(
        &self,
        text: String,
        filter: PropiedadFilter,
        page: PaginationParams,
    ) -> AppResult<Vec<Propiedad>>;

    async fn contar_propiedades(&self, query: Query<PropiedadFilter>) -> AppResult<u64>;

    async fn pagina_propiedades(
        &self,
        query: Query<PropiedadFilter>,
        page: PaginationParams,
    ) -> AppResult<Paginated<Propiedad>>;
}

/// Concrete implementation of PropiedadService.
pub struct PropiedadManager {
    propiedades: Arc<dyn Repository<Propiedad>>,
}

impl PropiedadManager {
    pub fn new(propiedades: Arc<dyn Repository<Propiedad>>) -> Self {
        Self { propiedades }
    }
}

#[async_trait]
impl PropiedadService for PropiedadManager {
    async fn obtener_propiedad(&self, id: i32) -> AppResult<Option<Propiedad>> {
        self.propiedades.find_by_id(id).await
    }

    async fn guardar_propiedad(&self, patch: PropiedadPatch) -> AppResult<Propiedad> {
        let saved = self.propiedades.save(patch).await?;
        tracing::info!(propiedad_id = saved.id, "Property saved");
        Ok(saved)
    }

    async fn eliminar_propiedad(&self, id: i32) -> AppResult<bool> {
        let deleted = self.propiedades.delete(id).await?;
        if deleted {
            tracing::info!(propiedad_id = id, "Property deactivated");
        }
        Ok(deleted)
    }

    async fn listar_propiedades(
        &self,
        filter: PropiedadFilter,
        page: PaginationParams,
    ) -> AppResult<Vec<Propiedad>> {
        self.propiedades.list(&Query::filtered(filter), page).await
    }

    async fn buscar_propiedades(
        &self,
        text: String,
        filter: PropiedadFilter,
        page: PaginationParams,
    ) -> AppResult<Vec<Propiedad>> {
        self.propiedades
            .list(&Query::search(text, filter), page)
            .await
    }

    async fn contar_propiedades(&self, query: Query<PropiedadFilter>) -> AppResult<u64> {
        self.propiedades.count(&query).await
    }

    async fn pagina_propiedades(
        &self,
        query: Query<PropiedadFilter>,
        page: PaginationParams,
    ) -> AppResult<Paginated<Propiedad>> {
        self.propiedades.page(&query, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Patch;
    use crate::infra::JsonFileRepository;
    use serde_json::json;

    fn manager(dir: &tempfile::TempDir) -> PropiedadManager {
        PropiedadManager::new(Arc::new(JsonFileRepository::<Propiedad>::new(
            dir.path().join("propiedades_store.json"),
        )))
    }

    fn form(value: serde_json::Value) -> PropiedadPatch {
        PropiedadPatch::from_form(value.as_object().unwrap())
    }

    #[tokio::test]
    async fn test_delete_is_soft() {
        let dir = tempfile::tempdir().unwrap();
        let propiedades = manager(&dir);

        let saved = propiedades
            .guardar_propiedad(form(json!({"titulo": "Casa", "precio": "1500000"})))
            .await
            .unwrap();
        assert!(propiedades.eliminar_propiedad(saved.id).await.unwrap());

        let stored = propiedades
            .obtener_propiedad(saved.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.activo);
        assert_eq!(stored.precio, 1_500_000.0);
        assert!(!propiedades.eliminar_propiedad(999).await.unwrap());
    }

    #[tokio::test]
    async fn test_pages_cover_count_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let propiedades = manager(&dir);
        for i in 0..7 {
            propiedades
                .guardar_propiedad(form(json!({
                    "titulo": format!("Depto {}", i),
                    "zona": if i % 2 == 0 { "Centro" } else { "Norte" },
                    "precio": 1_000_000 + i * 100_000
                })))
                .await
                .unwrap();
        }

        let filter = PropiedadFilter {
            zona: Some("centro".into()),
            precio_max: Some(1_500_000.0),
            ..Default::default()
        };
        let total = propiedades
            .contar_propiedades(Query::filtered(filter.clone()))
            .await
            .unwrap();

        let mut seen = Vec::new();
        for page in 1..=3 {
            let items = propiedades
                .listar_propiedades(filter.clone(), PaginationParams::new(page, 2))
                .await
                .unwrap();
            seen.extend(items.into_iter().map(|p| p.id));
        }
        assert_eq!(total, 3);
        assert_eq!(seen, vec![5, 3, 1]);
    }
}
