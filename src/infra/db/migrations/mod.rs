//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240301_000001_create_asesores_table;
mod m20240301_000002_create_clientes_table;
mod m20240301_000003_create_propiedades_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_asesores_table::Migration),
            Box::new(m20240301_000002_create_clientes_table::Migration),
            Box::new(m20240301_000003_create_propiedades_table::Migration),
        ]
    }
}
