//! Client database entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Condition};

use crate::domain::{Cliente, ClienteFilter, ClientePatch};
use crate::infra::repositories::sql::{key, lower_eq, or_default, patched, when, SqlRecord};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub activo: bool,
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
    pub fecha_registro: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Cliente {
    fn from(model: Model) -> Self {
        Cliente {
            id: model.id,
            activo: model.activo,
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
            ocupacion: model.ocupacion,
            antiguedad_laboral: model.antiguedad_laboral,
            ingreso_mensual: model.ingreso_mensual,
            tipo_credito: model.tipo_credito,
            buro_credito: model.buro_credito,
            presupuesto_min: model.presupuesto_min,
            presupuesto_max: model.presupuesto_max,
            nivel_educativo: model.nivel_educativo,
            hijos: model.hijos,
            metodo_captacion: model.metodo_captacion,
            origen_captacion: model.origen_captacion,
            interes_pais: model.interes_pais,
            interes_estado: model.interes_estado,
            interes_ciudad: model.interes_ciudad,
            interes_zona: model.interes_zona,
            interes_tipo: model.interes_tipo,
            zona_interes: model.zona_interes,
            deudor_alimenticio: model.deudor_alimenticio,
            propiedades_previas: model.propiedades_previas,
            num_propiedades_previas: model.num_propiedades_previas,
            edad_adquisicion: model.edad_adquisicion,
            estado_cliente: model.estado_cliente,
            tipo_cliente: model.tipo_cliente,
            etapa_embudo: model.etapa_embudo,
            score: model.score,
            asesor_id: model.asesor_id,
            fecha_registro: model.fecha_registro,
        }
    }
}

impl SqlRecord for Cliente {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;

    fn id_column() -> Column {
        Column::Id
    }

    fn activo_column() -> Column {
        Column::Activo
    }

    /// Inserts are stamped with the registration time.
    fn active_model(p: &ClientePatch, id: Option<i32>) -> ActiveModel {
        ActiveModel {
            id: key(id),
            activo: or_default(&p.activo, id, true),
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
            ocupacion: patched(&p.ocupacion),
            antiguedad_laboral: patched(&p.antiguedad_laboral),
            ingreso_mensual: patched(&p.ingreso_mensual),
            tipo_credito: patched(&p.tipo_credito),
            buro_credito: patched(&p.buro_credito),
            presupuesto_min: patched(&p.presupuesto_min),
            presupuesto_max: patched(&p.presupuesto_max),
            nivel_educativo: patched(&p.nivel_educativo),
            hijos: patched(&p.hijos),
            metodo_captacion: patched(&p.metodo_captacion),
            origen_captacion: patched(&p.origen_captacion),
            interes_pais: patched(&p.interes_pais),
            interes_estado: patched(&p.interes_estado),
            interes_ciudad: patched(&p.interes_ciudad),
            interes_zona: patched(&p.interes_zona),
            interes_tipo: patched(&p.interes_tipo),
            zona_interes: patched(&p.zona_interes),
            deudor_alimenticio: patched(&p.deudor_alimenticio),
            propiedades_previas: patched(&p.propiedades_previas),
            num_propiedades_previas: patched(&p.num_propiedades_previas),
            edad_adquisicion: patched(&p.edad_adquisicion),
            estado_cliente: patched(&p.estado_cliente),
            tipo_cliente: patched(&p.tipo_cliente),
            etapa_embudo: patched(&p.etapa_embudo),
            score: patched(&p.score),
            asesor_id: patched(&p.asesor_id),
            fecha_registro: match id {
                None => ActiveValue::Set(Some(Utc::now())),
                Some(_) => ActiveValue::NotSet,
            },
        }
    }

    fn filter_condition(f: &ClienteFilter) -> Condition {
        let cond = Condition::all();
        let cond = when(cond, f.asesor_id, |v| Column::AsesorId.eq(v));
        let cond = when(cond, f.curp.as_deref(), |v| lower_eq(Column::Curp, v));
        let cond = when(cond, f.estado_cliente.as_deref(), |v| {
            lower_eq(Column::EstadoCliente, v)
        });
        let cond = when(cond, f.tipo_cliente.as_deref(), |v| {
            lower_eq(Column::TipoCliente, v)
        });
        let cond = when(cond, f.etapa_embudo.as_deref(), |v| {
            lower_eq(Column::EtapaEmbudo, v)
        });
        let cond = when(cond, f.origen_captacion.as_deref(), |v| {
            lower_eq(Column::OrigenCaptacion, v)
        });
        let cond = when(cond, f.presupuesto_min, |v| Column::PresupuestoMin.gte(v));
        let cond = when(cond, f.presupuesto_max, |v| Column::PresupuestoMax.lte(v));
        when(cond, f.activo, |v| Column::Activo.eq(v))
    }

    fn search_columns() -> Vec<Column> {
        vec![
            Column::PrimerNombre,
            Column::SegundoNombre,
            Column::ApellidoPaterno,
            Column::ApellidoMaterno,
            Column::Curp,
            Column::Telefono,
            Column::Correo,
        ]
    }
}
