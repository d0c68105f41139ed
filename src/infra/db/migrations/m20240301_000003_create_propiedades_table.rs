//! Migration: Create propiedades table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Propiedades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Propiedades::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Propiedades::Titulo).string().null())
                    .col(ColumnDef::new(Propiedades::Descripcion).text().null())
                    .col(
                        ColumnDef::new(Propiedades::Precio)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Propiedades::Metros).double().null())
                    .col(ColumnDef::new(Propiedades::Estado).string().null())
                    .col(ColumnDef::new(Propiedades::Ciudad).string().null())
                    .col(ColumnDef::new(Propiedades::Zona).string().null())
                    .col(ColumnDef::new(Propiedades::Tipo).string().null())
                    .col(ColumnDef::new(Propiedades::Habitaciones).integer().null())
                    .col(ColumnDef::new(Propiedades::Amenidades).text().null())
                    .col(
                        ColumnDef::new(Propiedades::Activo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_propiedades_zona")
                    .table(Propiedades::Table)
                    .col(Propiedades::Zona)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Propiedades::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Propiedades {
    Table,
    Id,
    Titulo,
    Descripcion,
    Precio,
    Metros,
    Estado,
    Ciudad,
    Zona,
    Tipo,
    Habitaciones,
    Amenidades,
    Activo,
}
