//! SeaORM repository generic over any [`SqlRecord`].

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use std::marker::PhantomData;

use super::base::Repository;
use crate::domain::{DeleteMode, Patch, Query, Record};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Mapping between a domain record and its table.
pub trait SqlRecord: Record {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: FromQueryResult + IntoActiveModel<Self::ActiveModel> + Into<Self> + Send + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    fn activo_column() -> <Self::Entity as EntityTrait>::Column;

    /// Columns written by the patch. `id` is `None` for an insert, where
    /// null fields stay unset so column defaults apply.
    fn active_model(patch: &Self::Patch, id: Option<i32>) -> Self::ActiveModel;

    /// Storage form of [`Record::matches`].
    fn filter_condition(filter: &Self::Filter) -> Condition;

    /// Columns compared by free-text search.
    fn search_columns() -> Vec<<Self::Entity as EntityTrait>::Column>;
}

/// Case-insensitive equality: `LOWER(col) = lower(value)`.
pub(crate) fn lower_eq<C: IntoColumnRef>(col: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).eq(value.trim().to_lowercase())
}

/// Case-insensitive substring test: `LOWER(col) LIKE '%needle%' ESCAPE '\'`.
pub(crate) fn lower_contains<C: IntoColumnRef>(col: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Escape LIKE wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Column value for a patch field: present fields are written, absent
/// fields are left untouched.
pub(crate) fn patched<T>(value: &Option<T>) -> ActiveValue<T>
where
    T: Clone + Into<sea_orm::Value>,
{
    match value {
        Some(v) => ActiveValue::Set(v.clone()),
        None => ActiveValue::NotSet,
    }
}

/// Primary key column: unset on insert so the database assigns it.
pub(crate) fn key(id: Option<i32>) -> ActiveValue<i32> {
    match id {
        Some(id) => ActiveValue::Unchanged(id),
        None => ActiveValue::NotSet,
    }
}

/// Non-null column: the patch value, or `default` when inserting.
pub(crate) fn or_default<T>(value: &Option<T>, id: Option<i32>, default: T) -> ActiveValue<T>
where
    T: Clone + Into<sea_orm::Value>,
{
    match (value, id) {
        (Some(v), _) => ActiveValue::Set(v.clone()),
        (None, None) => ActiveValue::Set(default),
        (None, Some(_)) => ActiveValue::NotSet,
    }
}

/// Optional clause helper: adds `expr` only when the filter key is present.
pub(crate) fn when<T>(
    cond: Condition,
    value: Option<T>,
    expr: impl FnOnce(T) -> SimpleExpr,
) -> Condition {
    match value {
        Some(v) => cond.add(expr(v)),
        None => cond,
    }
}

pub struct SqlRepository<R> {
    db: DatabaseConnection,
    _record: PhantomData<fn() -> R>,
}

impl<R: SqlRecord> SqlRepository<R> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    fn select(&self, query: &Query<R::Filter>) -> Select<R::Entity> {
        let mut condition = Condition::all().add(R::filter_condition(&query.filter));
        if let Some(needle) = query.needle() {
            let any = R::search_columns()
                .into_iter()
                .fold(Condition::any(), |any, col| any.add(lower_contains(col, &needle)));
            condition = condition.add(any);
        }
        R::Entity::find()
            .filter(condition)
            .order_by_desc(R::id_column())
    }

    /// Every row matching the storage predicate and the in-memory residue.
    async fn scan(&self, query: &Query<R::Filter>) -> AppResult<Vec<R>> {
        let rows = self
            .select(query)
            .all(&self.db)
            .await
            .map_err(|e| log_db_error::<R>("scan", e))?;
        Ok(rows
            .into_iter()
            .map(Into::into)
            .filter(|r: &R| r.matches(&query.filter))
            .collect())
    }
}

fn log_db_error<R: Record>(operation: &str, e: DbErr) -> AppError {
    tracing::error!(collection = R::COLLECTION, operation, "Database error: {}", e);
    AppError::Database(e)
}

#[async_trait]
impl<R: SqlRecord> Repository<R> for SqlRepository<R> {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<R>> {
        let row = R::Entity::find()
            .filter(R::id_column().eq(id))
            .one(&self.db)
            .await
            .map_err(|e| log_db_error::<R>("find_by_id", e))?;
        Ok(row.map(Into::into))
    }

    async fn save(&self, patch: R::Patch) -> AppResult<R> {
        let Some(id) = patch.id() else {
            let model = R::active_model(&patch, None)
                .insert(&self.db)
                .await
                .map_err(|e| log_db_error::<R>("insert", e))?;
            let saved: R = model.into();
            tracing::debug!(collection = R::COLLECTION, id = saved.id(), "Record inserted");
            return Ok(saved);
        };

        if patch.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(R::NAME));
        }

        match R::active_model(&patch, Some(id)).update(&self.db).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                Err(AppError::not_found(R::NAME))
            }
            Err(e) => Err(log_db_error::<R>("update", e)),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let rows_affected = match R::DELETE_MODE {
            DeleteMode::Hard => R::Entity::delete_many()
                .filter(R::id_column().eq(id))
                .exec(&self.db)
                .await
                .map_err(|e| log_db_error::<R>("delete", e))?
                .rows_affected,
            DeleteMode::Soft => R::Entity::update_many()
                .col_expr(R::activo_column(), Expr::value(false))
                .filter(R::id_column().eq(id))
                .exec(&self.db)
                .await
                .map_err(|e| log_db_error::<R>("deactivate", e))?
                .rows_affected,
        };
        Ok(rows_affected > 0)
    }

    async fn list(&self, query: &Query<R::Filter>, page: PaginationParams) -> AppResult<Vec<R>> {
        if R::requires_scan(&query.filter) {
            return Ok(page.slice(self.scan(query).await?));
        }
        let rows = self
            .select(query)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(|e| log_db_error::<R>("list", e))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, query: &Query<R::Filter>) -> AppResult<u64> {
        if R::requires_scan(&query.filter) {
            return Ok(self.scan(query).await?.len() as u64);
        }
        self.select(query)
            .count(&self.db)
            .await
            .map_err(|e| log_db_error::<R>("count", e))
    }
}
