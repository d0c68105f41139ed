//! Advisor database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Condition;

use crate::domain::{Asesor, AsesorFilter, AsesorPatch, Rol};
use crate::infra::repositories::sql::{key, lower_eq, or_default, patched, when, SqlRecord};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "asesores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub rol: String,
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub activo: bool,
    pub requiere_cambio_password: bool,
    pub ultimo_acceso: Option<DateTimeUtc>,
    pub primer_nombre: Option<String>,
    pub segundo_nombre: Option<String>,
    pub apellido_paterno: Option<String>,
    pub apellido_materno: Option<String>,
    pub curp: Option<String>,
    pub fecha_nacimiento: Option<Date>,
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
    pub fecha_ingreso: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Asesor {
    fn from(model: Model) -> Self {
        Asesor {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            rol: Rol::from(model.rol.as_str()),
            nombres: model.nombres,
            apellidos: model.apellidos,
            activo: model.activo,
            requiere_cambio_password: model.requiere_cambio_password,
            ultimo_acceso: model.ultimo_acceso,
            primer_nombre: model.primer_nombre,
            segundo_nombre: model.segundo_nombre,
            apellido_paterno: model.apellido_paterno,
            apellido_materno: model.apellido_materno,
            curp: model.curp,
            fecha_nacimiento: model.fecha_nacimiento,
            edad: model.edad,
            genero: model.genero,
            estado_civil: model.estado_civil,
            telefono: model.telefono,
            correo: model.correo,
            pais: model.pais,
            estado: model.estado,
            ciudad: model.ciudad,
            zona: model.zona,
            inmobiliaria: model.inmobiliaria,
            area: model.area,
            anos_experiencia: model.anos_experiencia,
            comision_asignada: model.comision_asignada,
            fecha_ingreso: model.fecha_ingreso,
        }
    }
}

impl SqlRecord for Asesor {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;

    fn id_column() -> Column {
        Column::Id
    }

    fn activo_column() -> Column {
        Column::Activo
    }

    fn active_model(p: &AsesorPatch, id: Option<i32>) -> ActiveModel {
        let rol = p.rol.map(|r| r.as_str().to_string());
        ActiveModel {
            id: key(id),
            username: or_default(&p.username, id, String::new()),
            password_hash: or_default(&p.password_hash, id, String::new()),
            rol: or_default(&rol, id, Rol::default().as_str().to_string()),
            nombres: patched(&p.nombres),
            apellidos: patched(&p.apellidos),
            activo: or_default(&p.activo, id, true),
            requiere_cambio_password: or_default(&p.requiere_cambio_password, id, false),
            ultimo_acceso: patched(&p.ultimo_acceso),
            primer_nombre: patched(&p.primer_nombre),
            segundo_nombre: patched(&p.segundo_nombre),
            apellido_paterno: patched(&p.apellido_paterno),
            apellido_materno: patched(&p.apellido_materno),
            curp: patched(&p.curp),
            fecha_nacimiento: patched(&p.fecha_nacimiento),
            edad: patched(&p.edad),
            genero: patched(&p.genero),
            estado_civil: patched(&p.estado_civil),
            telefono: patched(&p.telefono),
            correo: patched(&p.correo),
            pais: patched(&p.pais),
            estado: patched(&p.estado),
            ciudad: patched(&p.ciudad),
            zona: patched(&p.zona),
            inmobiliaria: patched(&p.inmobiliaria),
            area: patched(&p.area),
            anos_experiencia: patched(&p.anos_experiencia),
            comision_asignada: patched(&p.comision_asignada),
            fecha_ingreso: patched(&p.fecha_ingreso),
        }
    }

    /// Username matches exactly; role ignores case.
    fn filter_condition(f: &AsesorFilter) -> Condition {
        let cond = Condition::all();
        let cond = when(cond, f.username.clone(), |v| Column::Username.eq(v));
        let cond = when(cond, f.rol, |v| lower_eq(Column::Rol, v.as_str()));
        when(cond, f.activo, |v| Column::Activo.eq(v))
    }

    fn search_columns() -> Vec<Column> {
        vec![Column::Username, Column::Nombres, Column::Apellidos]
    }
}
