//! Client (prospect) entity, its allow-list and filters.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::contact::{written, ContactInfo};
use super::lenient;
use super::record::{
    bool_field, contains_ci, date_field, eq_ci, flag_field, float_field, id_field, int_field, set,
    text_field, DeleteMode, Patch, Record,
};
use crate::errors::AppResult;

/// Client record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cliente {
    pub id: i32,
    pub activo: bool,
    pub primer_nombre: Option<String>,
    pub segundo_nombre: Option<String>,
    pub apellido_paterno: Option<String>,
    pub apellido_materno: Option<String>,
    pub curp: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub edad: Option<i32>,
    pub genero: Option<String>,
    pub estado_civil: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub pais: Option<String>,
    pub estado: Option<String>,
    pub ciudad: Option<String>,
    pub zona: Option<String>,
    pub ocupacion: Option<String>,
    pub antiguedad_laboral: Option<String>,
    pub ingreso_mensual: Option<f64>,
    pub tipo_credito: Option<String>,
    pub buro_credito: Option<String>,
    pub presupuesto_min: Option<f64>,
    pub presupuesto_max: Option<f64>,
    pub nivel_educativo: Option<String>,
    pub hijos: Option<i32>,
    pub metodo_captacion: Option<String>,
    pub origen_captacion: Option<String>,
    pub interes_pais: Option<String>,
    pub interes_estado: Option<String>,
    pub interes_ciudad: Option<String>,
    pub interes_zona: Option<String>,
    pub interes_tipo: Option<String>,
    pub zona_interes: Option<String>,
    pub deudor_alimenticio: Option<bool>,
    pub propiedades_previas: Option<bool>,
    pub num_propiedades_previas: Option<i32>,
    pub edad_adquisicion: Option<i32>,
    pub estado_cliente: Option<String>,
    pub tipo_cliente: Option<String>,
    pub etapa_embudo: Option<String>,
    pub score: Option<i32>,
    pub asesor_id: Option<i32>,
    pub fecha_registro: Option<DateTime<Utc>>,
}

impl Cliente {
    /// Full name built from the non-empty name parts.
    pub fn nombre_completo(&self) -> String {
        [
            &self.primer_nombre,
            &self.segundo_nombre,
            &self.apellido_paterno,
            &self.apellido_materno,
        ]
        .iter()
        .filter_map(|part| part.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Allow-listed client fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientePatch {
    pub id: Option<i32>,
    pub activo: Option<bool>,
    pub primer_nombre: Option<Option<String>>,
    pub segundo_nombre: Option<Option<String>>,
    pub apellido_paterno: Option<Option<String>>,
    pub apellido_materno: Option<Option<String>>,
    pub curp: Option<Option<String>>,
    pub fecha_nacimiento: Option<Option<NaiveDate>>,
    pub edad: Option<Option<i32>>,
    pub genero: Option<Option<String>>,
    pub estado_civil: Option<Option<String>>,
    pub telefono: Option<Option<String>>,
    pub correo: Option<Option<String>>,
    pub pais: Option<Option<String>>,
    pub estado: Option<Option<String>>,
    pub ciudad: Option<Option<String>>,
    pub zona: Option<Option<String>>,
    pub ocupacion: Option<Option<String>>,
    pub antiguedad_laboral: Option<Option<String>>,
    pub ingreso_mensual: Option<Option<f64>>,
    pub tipo_credito: Option<Option<String>>,
    pub buro_credito: Option<Option<String>>,
    pub presupuesto_min: Option<Option<f64>>,
    pub presupuesto_max: Option<Option<f64>>,
    pub nivel_educativo: Option<Option<String>>,
    pub hijos: Option<Option<i32>>,
    pub metodo_captacion: Option<Option<String>>,
    pub origen_captacion: Option<Option<String>>,
    pub interes_pais: Option<Option<String>>,
    pub interes_estado: Option<Option<String>>,
    pub interes_ciudad: Option<Option<String>>,
    pub interes_zona: Option<Option<String>>,
    pub interes_tipo: Option<Option<String>>,
    pub zona_interes: Option<Option<String>>,
    pub deudor_alimenticio: Option<Option<bool>>,
    pub propiedades_previas: Option<Option<bool>>,
    pub num_propiedades_previas: Option<Option<i32>>,
    pub edad_adquisicion: Option<Option<i32>>,
    pub estado_cliente: Option<Option<String>>,
    pub tipo_cliente: Option<Option<String>>,
    pub etapa_embudo: Option<Option<String>>,
    pub score: Option<Option<i32>>,
    pub asesor_id: Option<Option<i32>>,
}

/// Form keys from the property-of-interest section and their canonical names.
const INTEREST_ALIASES: &[(&str, &str)] = &[
    ("pi_pais", "interes_pais"),
    ("pi_estado", "interes_estado"),
    ("pi_ciudad", "interes_ciudad"),
    ("pi_zona", "interes_zona"),
    ("pi_tipo", "interes_tipo"),
];

impl Patch for ClientePatch {
    fn from_form(form: &Map<String, Value>) -> Self {
        let mut form = form.clone();
        for (alias, canonical) in INTEREST_ALIASES {
            if !form.contains_key(*canonical) {
                if let Some(value) = form.get(*alias).cloned() {
                    form.insert((*canonical).to_string(), value);
                }
            }
        }

        Self {
            id: id_field(&form),
            activo: flag_field(&form, "activo"),
            primer_nombre: text_field(&form, "primer_nombre"),
            segundo_nombre: text_field(&form, "segundo_nombre"),
            apellido_paterno: text_field(&form, "apellido_paterno"),
            apellido_materno: text_field(&form, "apellido_materno"),
            curp: text_field(&form, "curp"),
            fecha_nacimiento: date_field(&form, "fecha_nacimiento"),
            edad: int_field(&form, "edad"),
            genero: text_field(&form, "genero"),
            estado_civil: text_field(&form, "estado_civil"),
            telefono: text_field(&form, "telefono"),
            correo: text_field(&form, "correo"),
            pais: text_field(&form, "pais"),
            estado: text_field(&form, "estado"),
            ciudad: text_field(&form, "ciudad"),
            zona: text_field(&form, "zona"),
            ocupacion: text_field(&form, "ocupacion"),
            antiguedad_laboral: text_field(&form, "antiguedad_laboral"),
            ingreso_mensual: float_field(&form, "ingreso_mensual"),
            tipo_credito: text_field(&form, "tipo_credito"),
            buro_credito: text_field(&form, "buro_credito"),
            presupuesto_min: float_field(&form, "presupuesto_min"),
            presupuesto_max: float_field(&form, "presupuesto_max"),
            nivel_educativo: text_field(&form, "nivel_educativo"),
            hijos: int_field(&form, "hijos"),
            metodo_captacion: text_field(&form, "metodo_captacion"),
            origen_captacion: text_field(&form, "origen_captacion"),
            interes_pais: text_field(&form, "interes_pais"),
            interes_estado: text_field(&form, "interes_estado"),
            interes_ciudad: text_field(&form, "interes_ciudad"),
            interes_zona: text_field(&form, "interes_zona"),
            interes_tipo: text_field(&form, "interes_tipo"),
            zona_interes: text_field(&form, "zona_interes"),
            deudor_alimenticio: bool_field(&form, "deudor_alimenticio"),
            propiedades_previas: bool_field(&form, "propiedades_previas"),
            num_propiedades_previas: int_field(&form, "num_propiedades_previas"),
            edad_adquisicion: int_field(&form, "edad_adquisicion"),
            estado_cliente: text_field(&form, "estado_cliente"),
            tipo_cliente: text_field(&form, "tipo_cliente"),
            etapa_embudo: text_field(&form, "etapa_embudo"),
            score: int_field(&form, "score"),
            asesor_id: int_field(&form, "asesor_id"),
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

impl ClientePatch {
    /// Format rules for CURP, phone and e-mail.
    pub fn validate_contact(&self) -> AppResult<()> {
        ContactInfo {
            curp: written(&self.curp),
            telefono: written(&self.telefono),
            correo: written(&self.correo),
        }
        .check()
    }

    /// Fill `edad` from `fecha_nacimiento` when a birth date is written and
    /// no age was supplied.
    pub fn derive_age(&mut self, today: NaiveDate) {
        let has_age = matches!(self.edad, Some(Some(_)));
        if let (Some(Some(birth)), false) = (self.fecha_nacimiento, has_age) {
            self.edad = Some(Some(age_on(birth, today)));
        }
    }
}

/// Whole years between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0)
}

/// Sparse client filters
#[derive(Debug, Clone, Default)]
pub struct ClienteFilter {
    /// Owning advisor
    pub asesor_id: Option<i32>,
    pub curp: Option<String>,
    pub estado_cliente: Option<String>,
    pub tipo_cliente: Option<String>,
    pub etapa_embudo: Option<String>,
    pub origen_captacion: Option<String>,
    /// Matches clients whose `presupuesto_min` is at least this value
    pub presupuesto_min: Option<f64>,
    /// Matches clients whose `presupuesto_max` is at most this value
    pub presupuesto_max: Option<f64>,
    pub activo: Option<bool>,
}

impl Record for Cliente {
    type Patch = ClientePatch;
    type Filter = ClienteFilter;

    const NAME: &'static str = "Cliente";
    const COLLECTION: &'static str = "clientes";
    const DELETE_MODE: DeleteMode = DeleteMode::Hard;

    fn id(&self) -> i32 {
        self.id
    }

    fn blank(id: i32) -> Self {
        Self {
            id,
            activo: true,
            primer_nombre: None,
            segundo_nombre: None,
            apellido_paterno: None,
            apellido_materno: None,
            curp: None,
            fecha_nacimiento: None,
            edad: None,
            genero: None,
            estado_civil: None,
            telefono: None,
            correo: None,
            pais: None,
            estado: None,
            ciudad: None,
            zona: None,
            ocupacion: None,
            antiguedad_laboral: None,
            ingreso_mensual: None,
            tipo_credito: None,
            buro_credito: None,
            presupuesto_min: None,
            presupuesto_max: None,
            nivel_educativo: None,
            hijos: None,
            metodo_captacion: None,
            origen_captacion: None,
            interes_pais: None,
            interes_estado: None,
            interes_ciudad: None,
            interes_zona: None,
            interes_tipo: None,
            zona_interes: None,
            deudor_alimenticio: None,
            propiedades_previas: None,
            num_propiedades_previas: None,
            edad_adquisicion: None,
            estado_cliente: None,
            tipo_cliente: None,
            etapa_embudo: None,
            score: None,
            asesor_id: None,
            fecha_registro: Some(Utc::now()),
        }
    }

    fn restore_stored(&mut self, doc: &Map<String, Value>) {
        self.fecha_registro = doc.get("fecha_registro").and_then(lenient::parse_timestamp);
    }

    fn apply(&mut self, p: &ClientePatch) {
        set(&mut self.activo, &p.activo);
        set(&mut self.primer_nombre, &p.primer_nombre);
        set(&mut self.segundo_nombre, &p.segundo_nombre);
        set(&mut self.apellido_paterno, &p.apellido_paterno);
        set(&mut self.apellido_materno, &p.apellido_materno);
        set(&mut self.curp, &p.curp);
        set(&mut self.fecha_nacimiento, &p.fecha_nacimiento);
        set(&mut self.edad, &p.edad);
        set(&mut self.genero, &p.genero);
        set(&mut self.estado_civil, &p.estado_civil);
        set(&mut self.telefono, &p.telefono);
        set(&mut self.correo, &p.correo);
        set(&mut self.pais, &p.pais);
        set(&mut self.estado, &p.estado);
        set(&mut self.ciudad, &p.ciudad);
        set(&mut self.zona, &p.zona);
        set(&mut self.ocupacion, &p.ocupacion);
        set(&mut self.antiguedad_laboral, &p.antiguedad_laboral);
        set(&mut self.ingreso_mensual, &p.ingreso_mensual);
        set(&mut self.tipo_credito, &p.tipo_credito);
        set(&mut self.buro_credito, &p.buro_credito);
        set(&mut self.presupuesto_min, &p.presupuesto_min);
        set(&mut self.presupuesto_max, &p.presupuesto_max);
        set(&mut self.nivel_educativo, &p.nivel_educativo);
        set(&mut self.hijos, &p.hijos);
        set(&mut self.metodo_captacion, &p.metodo_captacion);
        set(&mut self.origen_captacion, &p.origen_captacion);
        set(&mut self.interes_pais, &p.interes_pais);
        set(&mut self.interes_estado, &p.interes_estado);
        set(&mut self.interes_ciudad, &p.interes_ciudad);
        set(&mut self.interes_zona, &p.interes_zona);
        set(&mut self.interes_tipo, &p.interes_tipo);
        set(&mut self.zona_interes, &p.zona_interes);
        set(&mut self.deudor_alimenticio, &p.deudor_alimenticio);
        set(&mut self.propiedades_previas, &p.propiedades_previas);
        set(&mut self.num_propiedades_previas, &p.num_propiedades_previas);
        set(&mut self.edad_adquisicion, &p.edad_adquisicion);
        set(&mut self.estado_cliente, &p.estado_cliente);
        set(&mut self.tipo_cliente, &p.tipo_cliente);
        set(&mut self.etapa_embudo, &p.etapa_embudo);
        set(&mut self.score, &p.score);
        set(&mut self.asesor_id, &p.asesor_id);
    }

    fn deactivate(&mut self) {
        self.activo = false;
    }

    fn matches(&self, f: &ClienteFilter) -> bool {
        let text_eq = |filter: &Option<String>, value: &Option<String>| {
            filter
                .as_deref()
                .map_or(true, |v| eq_ci(value.as_deref(), v))
        };

        f.asesor_id.map_or(true, |id| self.asesor_id == Some(id))
            && text_eq(&f.curp, &self.curp)
            && text_eq(&f.estado_cliente, &self.estado_cliente)
            && text_eq(&f.tipo_cliente, &self.tipo_cliente)
            && text_eq(&f.etapa_embudo, &self.etapa_embudo)
            && text_eq(&f.origen_captacion, &self.origen_captacion)
            && f
                .presupuesto_min
                .map_or(true, |min| self.presupuesto_min.map_or(false, |v| v >= min))
            && f
                .presupuesto_max
                .map_or(true, |max| self.presupuesto_max.map_or(false, |v| v <= max))
            && f.activo.map_or(true, |a| self.activo == a)
    }

    fn matches_text(&self, needle: &str) -> bool {
        [
            &self.primer_nombre,
            &self.segundo_nombre,
            &self.apellido_paterno,
            &self.apellido_materno,
            &self.curp,
            &self.telefono,
            &self.correo,
        ]
        .iter()
        .any(|field| contains_ci(field.as_deref(), needle))
    }
}

/// Credit type weights for the predictive score. Unknown types weigh 0.5.
const CREDIT_TYPE_WEIGHTS: &[(&str, f64)] = &[
    ("hipotecario", 1.0),
    ("contado", 1.0),
    ("infonavit", 0.8),
    ("bancario", 0.9),
    ("no aplica", 0.2),
];

/// Predictive purchase score in `0..=100`.
///
/// 40 points for budget relative to monthly income, 40 for available credit
/// relative to budget and 20 weighted by credit type.
pub fn calcular_score(ingreso: f64, presupuesto: f64, credito: f64, tipo_credito: &str) -> i32 {
    let mut score = 0.0;
    if ingreso > 0.0 {
        score += (presupuesto / ingreso).min(1.0) * 40.0;
    }
    if presupuesto > 0.0 {
        score += (credito / presupuesto).min(1.0) * 40.0;
    }
    let tipo = tipo_credito.trim().to_lowercase();
    let weight = CREDIT_TYPE_WEIGHTS
        .iter()
        .find(|(name, _)| *name == tipo)
        .map(|(_, w)| *w)
        .unwrap_or(0.5);
    score += weight * 20.0;

    (score.round() as i32).clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_form_normalizes_values() {
        let patch = ClientePatch::from_form(&form(json!({
            "primer_nombre": "  Ana ",
            "segundo_nombre": "None",
            "correo": "",
            "edad": "treinta",
            "ingreso_mensual": "45000.5",
            "deudor_alimenticio": "no",
            "propiedades_previas": "sí",
            "fecha_nacimiento": "31/12/1990",
            "columna_inventada": "x"
        })));

        assert_eq!(patch.primer_nombre, Some(Some("Ana".into())));
        assert_eq!(patch.segundo_nombre, Some(None));
        assert_eq!(patch.correo, Some(None));
        assert_eq!(patch.edad, Some(None));
        assert_eq!(patch.ingreso_mensual, Some(Some(45000.5)));
        assert_eq!(patch.deudor_alimenticio, Some(Some(false)));
        assert_eq!(patch.propiedades_previas, Some(Some(true)));
        assert_eq!(patch.fecha_nacimiento, Some(None));
        assert_eq!(patch.apellido_paterno, None);
    }

    #[test]
    fn test_interest_aliases() {
        let patch = ClientePatch::from_form(&form(json!({
            "pi_ciudad": "Zapopan",
            "pi_zona": "Andares",
            "interes_zona": "Centro"
        })));
        assert_eq!(patch.interes_ciudad, Some(Some("Zapopan".into())));
        assert_eq!(patch.interes_zona, Some(Some("Centro".into())));
    }

    #[test]
    fn test_blank_id_means_insert() {
        let patch = ClientePatch::from_form(&form(json!({"id": "", "curp": "X"})));
        assert_eq!(patch.id, None);
        let patch = ClientePatch::from_form(&form(json!({"id": "15"})));
        assert_eq!(patch.id, Some(15));
        assert!(patch.is_empty());
    }

    #[test]
    fn test_curp_length_rule() {
        let short = ClientePatch {
            curp: Some(Some("X".repeat(17))),
            ..Default::default()
        };
        let exact = ClientePatch {
            curp: Some(Some("X".repeat(18))),
            ..Default::default()
        };
        assert!(short.validate_contact().is_err());
        assert!(exact.validate_contact().is_ok());
    }

    #[test]
    fn test_age_is_derived_from_birth_date() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut patch = ClientePatch {
            fecha_nacimiento: Some(NaiveDate::from_ymd_opt(1990, 6, 2)),
            ..Default::default()
        };
        patch.derive_age(today);
        assert_eq!(patch.edad, Some(Some(33)));

        let mut explicit = ClientePatch {
            fecha_nacimiento: Some(NaiveDate::from_ymd_opt(1990, 6, 2)),
            edad: Some(Some(40)),
            ..Default::default()
        };
        explicit.derive_age(today);
        assert_eq!(explicit.edad, Some(Some(40)));
    }

    #[test]
    fn test_budget_filters() {
        let mut record = Cliente::blank(1);
        record.presupuesto_min = Some(1_000_000.0);
        record.presupuesto_max = Some(2_000_000.0);

        let fits = ClienteFilter {
            presupuesto_min: Some(1_000_000.0),
            presupuesto_max: Some(2_000_000.0),
            ..Default::default()
        };
        let too_rich = ClienteFilter {
            presupuesto_min: Some(1_500_000.0),
            ..Default::default()
        };
        assert!(record.matches(&fits));
        assert!(!record.matches(&too_rich));
        assert!(!Cliente::blank(2).matches(&fits));
    }

    #[test]
    fn test_stage_filter_ignores_case() {
        let mut record = Cliente::blank(1);
        record.etapa_embudo = Some("Prospecto".into());
        let filter = ClienteFilter {
            etapa_embudo: Some("prospecto".into()),
            ..Default::default()
        };
        assert!(record.matches(&filter));
    }

    #[test]
    fn test_text_search_covers_contact_fields() {
        let mut record = Cliente::blank(1);
        record.correo = Some("Ana.Lopez@Example.com".into());
        record.telefono = Some("3312345678".into());
        assert!(record.matches_text("lopez@"));
        assert!(record.matches_text("1234"));
        assert!(!record.matches_text("garcia"));
    }

    #[test]
    fn test_score() {
        assert_eq!(calcular_score(50_000.0, 2_000_000.0, 2_000_000.0, "Hipotecario"), 100);
        assert_eq!(calcular_score(0.0, 0.0, 0.0, "No Aplica"), 4);
        assert_eq!(calcular_score(0.0, 0.0, 0.0, "Desconocido"), 10);
        assert_eq!(calcular_score(100.0, 50.0, 25.0, "infonavit"), 56);
    }

    #[test]
    fn test_nombre_completo_skips_missing_parts() {
        let mut record = Cliente::blank(1);
        record.primer_nombre = Some("Ana".into());
        record.apellido_paterno = Some("Lopez".into());
        assert_eq!(record.nombre_completo(), "Ana Lopez");
    }
}
