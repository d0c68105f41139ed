//! Migration: Create asesores table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Asesores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Asesores::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Asesores::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Asesores::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Asesores::Rol)
                            .string()
                            .not_null()
                            .default("asesor"),
                    )
                    .col(ColumnDef::new(Asesores::Nombres).string().null())
                    .col(ColumnDef::new(Asesores::Apellidos).string().null())
                    .col(
                        ColumnDef::new(Asesores::Activo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Asesores::RequiereCambioPassword)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Asesores::UltimoAcceso)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Asesores::PrimerNombre).string().null())
                    .col(ColumnDef::new(Asesores::SegundoNombre).string().null())
                    .col(ColumnDef::new(Asesores::ApellidoPaterno).string().null())
                    .col(ColumnDef::new(Asesores::ApellidoMaterno).string().null())
                    .col(ColumnDef::new(Asesores::Curp).string_len(18).null())
                    .col(ColumnDef::new(Asesores::FechaNacimiento).date().null())
                    .col(ColumnDef::new(Asesores::Edad).integer().null())
                    .col(ColumnDef::new(Asesores::Genero).string().null())
                    .col(ColumnDef::new(Asesores::EstadoCivil).string().null())
                    .col(ColumnDef::new(Asesores::Telefono).string().null())
                    .col(ColumnDef::new(Asesores::Correo).string().null())
                    .col(ColumnDef::new(Asesores::Pais).string().null())
                    .col(ColumnDef::new(Asesores::Estado).string().null())
                    .col(ColumnDef::new(Asesores::Ciudad).string().null())
                    .col(ColumnDef::new(Asesores::Zona).string().null())
                    .col(ColumnDef::new(Asesores::Inmobiliaria).string().null())
                    .col(ColumnDef::new(Asesores::Area).string().null())
                    .col(ColumnDef::new(Asesores::AnosExperiencia).integer().null())
                    .col(ColumnDef::new(Asesores::ComisionAsignada).double().null())
                    .col(ColumnDef::new(Asesores::FechaIngreso).date().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_asesores_activo")
                    .table(Asesores::Table)
                    .col(Asesores::Activo)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Asesores::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Asesores {
    Table,
    Id,
    Username,
    PasswordHash,
    Rol,
    Nombres,
    Apellidos,
    Activo,
    RequiereCambioPassword,
    UltimoAcceso,
    PrimerNombre,
    SegundoNombre,
    ApellidoPaterno,
    ApellidoMaterno,
    Curp,
    FechaNacimiento,
    Edad,
    Genero,
    EstadoCivil,
    Telefono,
    Correo,
    Pais,
    Estado,
    Ciudad,
    Zona,
    Inmobiliaria,
    Area,
    AnosExperiencia,
    ComisionAsignada,
    FechaIngreso,
}
