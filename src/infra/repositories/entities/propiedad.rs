//! Property database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Condition;

use crate::domain::{Propiedad, PropiedadFilter, PropiedadPatch};
use crate::infra::repositories::sql::{key, lower_eq, or_default, patched, when, SqlRecord};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "propiedades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub titulo: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub descripcion: Option<String>,
    pub precio: f64,
    pub metros: Option<f64>,
    pub estado: Option<String>,
    pub ciudad: Option<String>,
    pub zona: Option<String>,
    pub tipo: Option<String>,
    pub habitaciones: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub amenidades: Option<String>,
    pub activo: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Propiedad {
    fn from(model: Model) -> Self {
        Propiedad {
            id: model.id,
            titulo: model.titulo,
            descripcion: model.descripcion,
            precio: model.precio,
            metros: model.metros,
            estado: model.estado,
            ciudad: model.ciudad,
            zona: model.zona,
            tipo: model.tipo,
            habitaciones: model.habitaciones,
            amenidades: model.amenidades,
            activo: model.activo,
        }
    }
}

impl SqlRecord for Propiedad {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;

    fn id_column() -> Column {
        Column::Id
    }

    fn activo_column() -> Column {
        Column::Activo
    }

    fn active_model(p: &PropiedadPatch, id: Option<i32>) -> ActiveModel {
        ActiveModel {
            id: key(id),
            titulo: patched(&p.titulo),
            descripcion: patched(&p.descripcion),
            precio: or_default(&p.precio, id, 0.0),
            metros: patched(&p.metros),
            estado: patched(&p.estado),
            ciudad: patched(&p.ciudad),
            zona: patched(&p.zona),
            tipo: patched(&p.tipo),
            habitaciones: patched(&p.habitaciones),
            amenidades: patched(&p.amenidades),
            activo: or_default(&p.activo, id, true),
        }
    }

    /// Amenities have no column predicate; they are checked after loading.
    fn filter_condition(f: &PropiedadFilter) -> Condition {
        let cond = Condition::all();
        let cond = when(cond, f.estado.as_deref(), |v| lower_eq(Column::Estado, v));
        let cond = when(cond, f.tipo.as_deref(), |v| lower_eq(Column::Tipo, v));
        let cond = when(cond, f.zona.as_deref(), |v| lower_eq(Column::Zona, v));
        let cond = when(cond, f.precio_min, |v| Column::Precio.gte(v));
        let cond = when(cond, f.precio_max, |v| Column::Precio.lte(v));
        let cond = when(cond, f.habitaciones, |v| Column::Habitaciones.eq(v));
        when(cond, f.activo, |v| Column::Activo.eq(v))
    }

    fn search_columns() -> Vec<Column> {
        vec![
            Column::Titulo,
            Column::Descripcion,
            Column::Estado,
            Column::Ciudad,
            Column::Zona,
        ]
    }
}
