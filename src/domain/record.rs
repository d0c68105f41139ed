//! Backend-agnostic record contract shared by every repository.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// How a repository removes a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// The row is removed permanently.
    Hard,
    /// The row stays with `activo = false`.
    Soft,
}

/// Allow-listed set of fields for an insert or update.
///
/// Every field is optional: an absent field is left untouched. Nullable
/// columns use `Option<Option<T>>` so an explicit null can be written.
pub trait Patch: Clone + Default + Send + Sync + std::fmt::Debug {
    /// Build a patch from loosely typed form data. Unknown keys are dropped
    /// and values are coerced with the lenient parsers.
    fn from_form(form: &Map<String, Value>) -> Self;

    /// Target id. `None` means insert.
    fn id(&self) -> Option<i32>;

    /// True when no field besides the id is present.
    fn is_empty(&self) -> bool;
}

/// Text search plus sparse filters.
#[derive(Debug, Clone, Default)]
pub struct Query<F> {
    pub text: Option<String>,
    pub filter: F,
}

impl<F: Default> Query<F> {
    pub fn filtered(filter: F) -> Self {
        Self { text: None, filter }
    }

    pub fn search(text: impl Into<String>, filter: F) -> Self {
        Self {
            text: Some(text.into()),
            filter,
        }
    }

    /// Search needle, lowercased, if any non-blank text was supplied.
    pub fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

/// An entity that can be stored by either repository backend.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    type Patch: Patch;
    type Filter: Clone + Default + Send + Sync + std::fmt::Debug;

    /// Singular name used in error messages.
    const NAME: &'static str;
    /// Collection name used in logs.
    const COLLECTION: &'static str;
    const DELETE_MODE: DeleteMode;

    fn id(&self) -> i32;

    /// A new record holding only storage defaults.
    fn blank(id: i32) -> Self;

    /// Write every present patch field onto the record.
    fn apply(&mut self, patch: &Self::Patch);

    fn deactivate(&mut self);

    /// In-memory form of the filter predicate.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Case-insensitive substring match over the searchable fields.
    /// `needle` is already lowercased.
    fn matches_text(&self, needle: &str) -> bool;

    /// Filters that cannot be expressed as a storage predicate force a full
    /// scan before paginating.
    fn requires_scan(_filter: &Self::Filter) -> bool {
        false
    }

    /// Copy fields that only storage writes (hashes, audit stamps) from a
    /// legacy document. Form decoding never reads them.
    fn restore_stored(&mut self, _doc: &Map<String, Value>) {}

    /// Load a stored document. Documents written by this crate decode
    /// directly; anything else goes through the lenient form path.
    fn from_document(doc: &Map<String, Value>) -> Option<Self> {
        if let Ok(record) = serde_json::from_value::<Self>(Value::Object(doc.clone())) {
            return Some(record);
        }
        let id = lenient::parse_int_or(doc.get("id")?, None)?;
        let mut record = Self::blank(id);
        record.apply(&Self::Patch::from_form(doc));
        record.restore_stored(doc);
        Some(record)
    }
}

/// Case-insensitive equality against an optional column value.
pub fn eq_ci(value: Option<&str>, expected: &str) -> bool {
    value
        .map(|v| v.to_lowercase() == expected.trim().to_lowercase())
        .unwrap_or(false)
}

/// Substring test against an optional column value. `needle` is lowercased.
pub fn contains_ci(value: Option<&str>, needle: &str) -> bool {
    value
        .map(|v| v.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Inclusive range test. Records without a value fail any active bound.
pub fn in_range(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(v) = value else {
        return false;
    };
    min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m)
}

/// Read a nullable text field from a form.
pub(crate) fn text_field(form: &Map<String, Value>, key: &str) -> Option<Option<String>> {
    form.get(key).map(lenient::clean_text)
}

pub(crate) fn int_field(form: &Map<String, Value>, key: &str) -> Option<Option<i32>> {
    form.get(key).map(|v| lenient::parse_int_or(v, None))
}

pub(crate) fn float_field(form: &Map<String, Value>, key: &str) -> Option<Option<f64>> {
    form.get(key).map(|v| lenient::parse_float_or(v, None))
}

pub(crate) fn bool_field(form: &Map<String, Value>, key: &str) -> Option<Option<bool>> {
    form.get(key).map(|v| lenient::parse_bool_or(v, None))
}

pub(crate) fn date_field(
    form: &Map<String, Value>,
    key: &str,
) -> Option<Option<chrono::NaiveDate>> {
    form.get(key).map(lenient::parse_date)
}

/// Read a non-nullable flag. Present means set to its truthiness.
pub(crate) fn flag_field(form: &Map<String, Value>, key: &str) -> Option<bool> {
    form.get(key).map(lenient::truthy)
}

/// Read the target id. Blank or unparseable ids mean insert.
pub(crate) fn id_field(form: &Map<String, Value>) -> Option<i32> {
    form.get("id").and_then(|v| lenient::parse_int_or(v, None))
}

/// Overwrite `target` when the patch carries the field.
pub(crate) fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}
