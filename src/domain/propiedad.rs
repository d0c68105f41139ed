//! Property listing entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::lenient;
use super::record::{
    contains_ci, eq_ci, float_field, flag_field, id_field, in_range, int_field, set, text_field,
    DeleteMode, Patch, Record,
};

/// Property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Propiedad {
    pub id: i32,
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub precio: f64,
    pub metros: Option<f64>,
    pub estado: Option<String>,
    pub ciudad: Option<String>,
    pub zona: Option<String>,
    pub tipo: Option<String>,
    pub habitaciones: Option<i32>,
    /// Comma separated amenity names
    pub amenidades: Option<String>,
    pub activo: bool,
}

impl Propiedad {
    /// Amenity names, trimmed, without blanks.
    pub fn amenity_list(&self) -> Vec<String> {
        split_amenities(self.amenidades.as_deref())
    }

    /// True when every requested amenity is present (case-insensitive).
    pub fn has_amenities(&self, requested: &[String]) -> bool {
        let have: Vec<String> = self
            .amenity_list()
            .into_iter()
            .map(|a| a.to_lowercase())
            .collect();
        requested
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .all(|a| have.contains(&a))
    }
}

fn split_amenities(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Allow-listed property fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropiedadPatch {
    pub id: Option<i32>,
    pub titulo: Option<Option<String>>,
    pub descripcion: Option<Option<String>>,
    pub precio: Option<f64>,
    pub metros: Option<Option<f64>>,
    pub estado: Option<Option<String>>,
    pub ciudad: Option<Option<String>>,
    pub zona: Option<Option<String>>,
    pub tipo: Option<Option<String>>,
    pub habitaciones: Option<Option<i32>>,
    pub amenidades: Option<Option<String>>,
    pub activo: Option<bool>,
}

impl Patch for PropiedadPatch {
    fn from_form(form: &Map<String, Value>) -> Self {
        let form = flatten_legacy(form);
        Self {
            id: id_field(&form),
            titulo: text_field(&form, "titulo"),
            descripcion: text_field(&form, "descripcion"),
            precio: form
                .get("precio")
                .map(|v| lenient::parse_float_or(v, Some(0.0)).unwrap_or(0.0)),
            metros: float_field(&form, "metros"),
            estado: text_field(&form, "estado"),
            ciudad: text_field(&form, "ciudad"),
            zona: text_field(&form, "zona"),
            tipo: text_field(&form, "tipo"),
            habitaciones: int_field(&form, "habitaciones"),
            amenidades: text_field(&form, "amenidades"),
            activo: flag_field(&form, "activo"),
        }
    }

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn is_empty(&self) -> bool {
        *self
            == Self {
                id: self.id,
                ..Self::default()
            }
    }
}

/// Rewrite legacy nested shapes into the flat schema.
///
/// `ubicacion` supplies `ciudad`, `estado` and `zona` (or `colonia`),
/// `caracteristicas` supplies `amenidades` and `tipo_propiedad` supplies
/// `tipo`. Flat keys always win.
fn flatten_legacy(form: &Map<String, Value>) -> Map<String, Value> {
    let mut data = form.clone();

    if !data.contains_key("tipo") {
        if let Some(tipo) = form.get("tipo_propiedad") {
            data.insert("tipo".into(), tipo.clone());
        }
    }

    if let Some(Value::Object(ubicacion)) = form.get("ubicacion") {
        let lookup = |keys: &[&str]| {
            keys.iter().find_map(|key| {
                ubicacion
                    .iter()
                    .find(|(k, v)| k.eq_ignore_ascii_case(key) && !lenient::is_empty(v))
                    .map(|(_, v)| v.clone())
            })
        };
        for (field, keys) in [
            ("ciudad", &["ciudad"][..]),
            ("estado", &["estado"][..]),
            ("zona", &["zona", "colonia"][..]),
        ] {
            if !data.contains_key(field) {
                if let Some(value) = lookup(keys) {
                    data.insert(field.into(), value);
                }
            }
        }
    }

    if !data.contains_key("amenidades") {
        let joined = match form.get("caracteristicas") {
            Some(Value::Object(flags)) => Some(
                flags
                    .iter()
                    .filter(|(_, v)| lenient::truthy(v))
                    .map(|(k, _)| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Some(Value::Array(items)) => Some(join_items(items)),
            _ => None,
        };
        if let Some(joined) = joined.filter(|j| !j.is_empty()) {
            data.insert("amenidades".into(), Value::String(joined));
        }
    } else if let Some(Value::Array(items)) = form.get("amenidades") {
        data.insert("amenidades".into(), Value::String(join_items(items)));
    }

    data
}

fn join_items(items: &[Value]) -> String {
    items
        .iter()
        .filter_map(lenient::clean_text)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sparse property filters
#[derive(Debug, Clone, Default)]
pub struct PropiedadFilter {
    pub estado: Option<String>,
    pub tipo: Option<String>,
    pub zona: Option<String>,
    pub precio_min: Option<f64>,
    pub precio_max: Option<f64>,
    pub habitaciones: Option<i32>,
    pub activo: Option<bool>,
    /// Every listed amenity must be present
    pub amenidades: Vec<String>,
}

impl Record for Propiedad {
    type Patch = PropiedadPatch;
    type Filter = PropiedadFilter;

    const NAME: &'static str = "Propiedad";
    const COLLECTION: &'static str = "propiedades";
    const DELETE_MODE: DeleteMode = DeleteMode::Soft;

    fn id(&self) -> i32 {
        self.id
    }

    fn blank(id: i32) -> Self {
        Self {
            id,
            titulo: None,
            descripcion: None,
            precio: 0.0,
            metros: None,
            estado: None,
            ciudad: None,
            zona: None,
            tipo: None,
            habitaciones: None,
            amenidades: None,
            activo: true,
        }
    }

    fn apply(&mut self, patch: &PropiedadPatch) {
        set(&mut self.titulo, &patch.titulo);
        set(&mut self.descripcion, &patch.descripcion);
        set(&mut self.precio, &patch.precio);
        set(&mut self.metros, &patch.metros);
        set(&mut self.estado, &patch.estado);
        set(&mut self.ciudad, &patch.ciudad);
        set(&mut self.zona, &patch.zona);
        set(&mut self.tipo, &patch.tipo);
        set(&mut self.habitaciones, &patch.habitaciones);
        set(&mut self.amenidades, &patch.amenidades);
        set(&mut self.activo, &patch.activo);
    }

    fn deactivate(&mut self) {
        self.activo = false;
    }

    fn matches(&self, f: &PropiedadFilter) -> bool {
        f.estado.as_deref().map_or(true, |v| eq_ci(self.estado.as_deref(), v))
            && f.tipo.as_deref().map_or(true, |v| eq_ci(self.tipo.as_deref(), v))
            && f.zona.as_deref().map_or(true, |v| eq_ci(self.zona.as_deref(), v))
            && in_range(Some(self.precio), f.precio_min, f.precio_max)
            && f.habitaciones.map_or(true, |h| self.habitaciones == Some(h))
            && f.activo.map_or(true, |a| self.activo == a)
            && self.has_amenities(&f.amenidades)
    }

    fn matches_text(&self, needle: &str) -> bool {
        [
            &self.titulo,
            &self.descripcion,
            &self.estado,
            &self.ciudad,
            &self.zona,
        ]
        .iter()
        .any(|field| contains_ci(field.as_deref(), needle))
    }

    fn requires_scan(filter: &PropiedadFilter) -> bool {
        filter.amenidades.iter().any(|a| !a.trim().is_empty())
    }
}

/// Property as returned by the read API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PropertyResponse {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "Casa en Providencia")]
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    #[schema(example = 2450000.0)]
    pub precio: Option<f64>,
    pub metros: Option<f64>,
    #[schema(example = "Disponible")]
    pub estado: Option<String>,
    #[schema(example = "Guadalajara")]
    pub ciudad: Option<String>,
    #[schema(example = "Providencia")]
    pub zona: Option<String>,
    #[schema(example = "Casa")]
    pub tipo: Option<String>,
    pub habitaciones: Option<i32>,
    #[schema(example = json!(["alberca", "jardin"]))]
    pub amenidades: Option<Vec<String>>,
}

impl From<Propiedad> for PropertyResponse {
    fn from(p: Propiedad) -> Self {
        let amenidades = p.amenity_list();
        Self {
            id: p.id,
            titulo: p.titulo,
            descripcion: p.descripcion,
            precio: Some(p.precio),
            metros: p.metros,
            estado: p.estado,
            ciudad: p.ciudad,
            zona: p.zona,
            tipo: p.tipo,
            habitaciones: p.habitaciones,
            amenidades: Some(amenidades),
        }
    }
}
