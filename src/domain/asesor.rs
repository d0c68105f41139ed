//! Sales advisor entity and roles.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::contact::{written, ContactInfo};
use super::lenient;
use super::record::{
    contains_ci, date_field, eq_ci, flag_field, float_field, id_field, int_field, set, text_field,
    DeleteMode, Patch, Record,
};
use crate::config::{ROLE_ADMIN, ROLE_ASESOR};
use crate::errors::AppResult;

/// Advisor roles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Admin,
    #[default]
    Asesor,
}

impl Rol {
    pub fn is_admin(&self) -> bool {
        matches!(self, Rol::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => ROLE_ADMIN,
            Rol::Asesor => ROLE_ASESOR,
        }
    }
}

/// Case-insensitive. Anything other than `admin` is a plain advisor.
impl From<&str> for Rol {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case(ROLE_ADMIN) {
            Rol::Admin
        } else {
            Rol::Asesor
        }
    }
}

impl std::fmt::Display for Rol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Advisor account and HR profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Asesor {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub rol: Rol,
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub activo: bool,
    pub requiere_cambio_password: bool,
    pub ultimo_acceso: Option<DateTime<Utc>>,
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
    pub inmobiliaria: Option<String>,
    pub area: Option<String>,
    pub anos_experiencia: Option<i32>,
    pub comision_asignada: Option<f64>,
    pub fecha_ingreso: Option<NaiveDate>,
}

impl Asesor {
    pub fn is_admin(&self) -> bool {
        self.rol.is_admin()
    }
}

/// Allow-listed advisor fields.
///
/// `password_hash` and `ultimo_acceso` are never read from forms; only the
/// auth service writes them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsesorPatch {
    pub id: Option<i32>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub rol: Option<Rol>,
    pub nombres: Option<Option<String>>,
    pub apellidos: Option<Option<String>>,
    pub activo: Option<bool>,
    pub requiere_cambio_password: Option<bool>,
    pub ultimo_acceso: Option<Option<DateTime<Utc>>>,
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
    pub inmobiliaria: Option<Option<String>>,
    pub area: Option<Option<String>>,
    pub anos_experiencia: Option<Option<i32>>,
    pub comision_asignada: Option<Option<f64>>,
    pub fecha_ingreso: Option<Option<NaiveDate>>,
}

impl Patch for AsesorPatch {
    fn from_form(form: &Map<String, Value>) -> Self {
        Self {
            id: id_field(form),
            username: form
                .get("username")
                .map(|v| lenient::clean_text(v).unwrap_or_default()),
            password_hash: None,
            rol: form
                .get("rol")
                .and_then(lenient::clean_text)
                .map(|r| Rol::from(r.as_str())),
            nombres: text_field(form, "nombres"),
            apellidos: text_field(form, "apellidos"),
            activo: flag_field(form, "activo"),
            requiere_cambio_password: flag_field(form, "requiere_cambio_password"),
            ultimo_acceso: None,
            primer_nombre: text_field(form, "primer_nombre"),
            segundo_nombre: text_field(form, "segundo_nombre"),
            apellido_paterno: text_field(form, "apellido_paterno"),
            apellido_materno: text_field(form, "apellido_materno"),
            curp: text_field(form, "curp"),
            fecha_nacimiento: date_field(form, "fecha_nacimiento"),
            edad: int_field(form, "edad"),
            genero: text_field(form, "genero"),
            estado_civil: text_field(form, "estado_civil"),
            telefono: text_field(form, "telefono"),
            correo: text_field(form, "correo"),
            pais: text_field(form, "pais"),
            estado: text_field(form, "estado"),
            ciudad: text_field(form, "ciudad"),
            zona: text_field(form, "zona"),
            inmobiliaria: text_field(form, "inmobiliaria"),
            area: text_field(form, "area"),
            anos_experiencia: int_field(form, "anos_experiencia"),
            comision_asignada: float_field(form, "comision_asignada"),
            fecha_ingreso: date_field(form, "fecha_ingreso"),
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

impl AsesorPatch {
    pub fn validate_contact(&self) -> AppResult<()> {
        ContactInfo {
            curp: written(&self.curp),
            telefono: written(&self.telefono),
            correo: written(&self.correo),
        }
        .check()
    }
}

/// Sparse advisor filters
#[derive(Debug, Clone, Default)]
pub struct AsesorFilter {
    /// Exact username
    pub username: Option<String>,
    pub rol: Option<Rol>,
    pub activo: Option<bool>,
}

impl AsesorFilter {
    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }
}

impl Record for Asesor {
    type Patch = AsesorPatch;
    type Filter = AsesorFilter;

    const NAME: &'static str = "Asesor";
    const COLLECTION: &'static str = "asesores";
    const DELETE_MODE: DeleteMode = DeleteMode::Soft;

    fn id(&self) -> i32 {
        self.id
    }

    fn blank(id: i32) -> Self {
        Self {
            id,
            username: String::new(),
            password_hash: String::new(),
            rol: Rol::Asesor,
            nombres: None,
            apellidos: None,
            activo: true,
            requiere_cambio_password: false,
            ultimo_acceso: None,
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
            inmobiliaria: None,
            area: None,
            anos_experiencia: None,
            comision_asignada: None,
            fecha_ingreso: None,
        }
    }

    fn restore_stored(&mut self, doc: &Map<String, Value>) {
        if let Some(hash) = doc.get("password_hash").and_then(Value::as_str) {
            self.password_hash = hash.to_string();
        }
        self.ultimo_acceso = doc.get("ultimo_acceso").and_then(lenient::parse_timestamp);
    }

    fn apply(&mut self, p: &AsesorPatch) {
        set(&mut self.username, &p.username);
        set(&mut self.password_hash, &p.password_hash);
        set(&mut self.rol, &p.rol);
        set(&mut self.nombres, &p.nombres);
        set(&mut self.apellidos, &p.apellidos);
        set(&mut self.activo, &p.activo);
        set(&mut self.requiere_cambio_password, &p.requiere_cambio_password);
        set(&mut self.ultimo_acceso, &p.ultimo_acceso);
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
        set(&mut self.inmobiliaria, &p.inmobiliaria);
        set(&mut self.area, &p.area);
        set(&mut self.anos_experiencia, &p.anos_experiencia);
        set(&mut self.comision_asignada, &p.comision_asignada);
        set(&mut self.fecha_ingreso, &p.fecha_ingreso);
    }

    fn deactivate(&mut self) {
        self.activo = false;
    }

    fn matches(&self, f: &AsesorFilter) -> bool {
        f.username.as_deref().map_or(true, |u| self.username == u)
            && f.rol.map_or(true, |r| eq_ci(Some(self.rol.as_str()), r.as_str()))
            && f.activo.map_or(true, |a| self.activo == a)
    }

    fn matches_text(&self, needle: &str) -> bool {
        contains_ci(Some(self.username.as_str()), needle)
            || contains_ci(self.nombres.as_deref(), needle)
            || contains_ci(self.apellidos.as_deref(), needle)
    }
}

/// Advisor profile without credentials
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AsesorResponse {
    pub id: i32,
    #[schema(example = "mlopez")]
    pub username: String,
    pub rol: Rol,
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub activo: bool,
    pub requiere_cambio_password: bool,
    pub ultimo_acceso: Option<DateTime<Utc>>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub inmobiliaria: Option<String>,
    pub area: Option<String>,
}

impl From<Asesor> for AsesorResponse {
    fn from(a: Asesor) -> Self {
        Self {
            id: a.id,
            username: a.username,
            rol: a.rol,
            nombres: a.nombres,
            apellidos: a.apellidos,
            activo: a.activo,
            requiere_cambio_password: a.requiere_cambio_password,
            ultimo_acceso: a.ultimo_acceso,
            telefono: a.telefono,
            correo: a.correo,
            inmobiliaria: a.inmobiliaria,
            area: a.area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_parsing_ignores_case() {
        assert_eq!(Rol::from("ADMIN"), Rol::Admin);
        assert_eq!(Rol::from(" admin "), Rol::Admin);
        assert_eq!(Rol::from("asesor"), Rol::Asesor);
        assert_eq!(Rol::from("gerente"), Rol::Asesor);
    }

    #[test]
    fn test_form_never_sets_credentials() {
        let form = json!({
            "username": "mlopez",
            "password_hash": "forged",
            "ultimo_acceso": "2024-01-01T00:00:00Z",
            "rol": "Admin"
        });
        let patch = AsesorPatch::from_form(form.as_object().unwrap());
        assert_eq!(patch.username.as_deref(), Some("mlopez"));
        assert_eq!(patch.password_hash, None);
        assert_eq!(patch.ultimo_acceso, None);
        assert_eq!(patch.rol, Some(Rol::Admin));
    }

    #[test]
    fn test_response_has_no_hash() {
        let mut asesor = Asesor::blank(3);
        asesor.username = "mlopez".into();
        asesor.password_hash = "$argon2id$secret".into();
        let body = serde_json::to_string(&AsesorResponse::from(asesor)).unwrap();
        assert!(!body.contains("argon2"));
        assert!(body.contains("\"rol\":\"asesor\""));
    }

    #[test]
    fn test_filter_and_search() {
        let mut asesor = Asesor::blank(1);
        asesor.username = "mlopez".into();
        asesor.nombres = Some("María".into());
        asesor.rol = Rol::Admin;

        assert!(asesor.matches(&AsesorFilter::by_username("mlopez")));
        assert!(!asesor.matches(&AsesorFilter::by_username("MLOPEZ")));
        assert!(asesor.matches(&AsesorFilter {
            rol: Some(Rol::Admin),
            activo: Some(true),
            ..Default::default()
        }));
        assert!(asesor.matches_text("marí"));
        assert!(!asesor.matches_text("gomez"));
    }
}
