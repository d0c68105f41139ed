//! Repository capability shared by both storage backends.

use async_trait::async_trait;

use crate::domain::{Query, Record};
use crate::errors::AppResult;
use crate::types::{Paginated, PaginationParams};

/// Upsert, delete, filtered listing and counting for one record type.
///
/// Implemented by [`super::SqlRepository`] and [`super::JsonFileRepository`].
/// For the same stored data both return the same records in the same order
/// (`id` descending).
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<R>>;

    /// Insert when the patch has no id, otherwise update the present fields.
    ///
    /// Updating an id that does not exist is `AppError::NotFound`.
    async fn save(&self, patch: R::Patch) -> AppResult<R>;

    /// Remove or deactivate. `false` when no record has that id.
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// One page of matching records.
    async fn list(&self, query: &Query<R::Filter>, page: PaginationParams) -> AppResult<Vec<R>>;

    /// Number of records `list` paginates over for the same query.
    async fn count(&self, query: &Query<R::Filter>) -> AppResult<u64>;

    /// Page plus total in one call.
    async fn page(
        &self,
        query: &Query<R::Filter>,
        page: PaginationParams,
    ) -> AppResult<Paginated<R>> {
        let data = self.list(query, page).await?;
        let total = self.count(query).await?;
        Ok(Paginated::new(data, page, total))
    }
}
