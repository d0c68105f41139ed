//! Flat JSON document store.
//!
//! One pretty-printed array of objects per collection. Every read loads the
//! whole file; every write rewrites it. A missing file is an empty
//! collection. Writes are not atomic.

use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::base::Repository;
use crate::domain::{DeleteMode, Patch, Query, Record};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

pub struct JsonFileRepository<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonFileRepository<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every document, newest id first. Undecodable entries are skipped.
    async fn load(&self) -> AppResult<Vec<R>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!(collection = R::COLLECTION, path = %self.path.display(), "Failed to read store: {}", e);
                return Err(e.into());
            }
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let documents: Vec<Value> = serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(collection = R::COLLECTION, path = %self.path.display(), "Store is not a JSON array: {}", e);
            AppError::from(e)
        })?;

        let mut records: Vec<R> = documents
            .iter()
            .filter_map(|doc| {
                let record = doc.as_object().and_then(R::from_document);
                if record.is_none() {
                    tracing::warn!(collection = R::COLLECTION, "Skipping undecodable document");
                }
                record
            })
            .collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.id()));
        Ok(records)
    }

    async fn store(&self, records: &[R]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, body).await.map_err(|e| {
            tracing::error!(collection = R::COLLECTION, path = %self.path.display(), "Failed to write store: {}", e);
            AppError::from(e)
        })
    }

    async fn matching(&self, query: &Query<R::Filter>) -> AppResult<Vec<R>> {
        let needle = query.needle();
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|r| r.matches(&query.filter))
            .filter(|r| needle.as_deref().map_or(true, |n| r.matches_text(n)))
            .collect())
    }
}

#[async_trait]
impl<R: Record> Repository<R> for JsonFileRepository<R> {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<R>> {
        Ok(self.load().await?.into_iter().find(|r| r.id() == id))
    }

    async fn save(&self, patch: R::Patch) -> AppResult<R> {
        let mut records = self.load().await?;

        let saved = match patch.id() {
            Some(id) => {
                let record = records
                    .iter_mut()
                    .find(|r| r.id() == id)
                    .ok_or_else(|| AppError::not_found(R::NAME))?;
                if patch.is_empty() {
                    return Ok(record.clone());
                }
                record.apply(&patch);
                record.clone()
            }
            None => {
                let id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
                let mut record = R::blank(id);
                record.apply(&patch);
                records.insert(0, record.clone());
                record
            }
        };

        self.store(&records).await?;
        tracing::debug!(collection = R::COLLECTION, id = saved.id(), "Record saved");
        Ok(saved)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut records = self.load().await?;
        let Some(pos) = records.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };

        match R::DELETE_MODE {
            DeleteMode::Hard => {
                records.remove(pos);
            }
            DeleteMode::Soft => records[pos].deactivate(),
        }
        self.store(&records).await?;
        Ok(true)
    }

    async fn list(&self, query: &Query<R::Filter>, page: PaginationParams) -> AppResult<Vec<R>> {
        Ok(page.slice(self.matching(query).await?))
    }

    async fn count(&self, query: &Query<R::Filter>) -> AppResult<u64> {
        Ok(self.matching(query).await?.len() as u64)
    }
}
