//! Migration: Create clientes table.
//!
//! `curp` is indexed but not unique; duplicates are rejected by the
//! application before writing.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clientes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clientes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Clientes::Activo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Clientes::PrimerNombre).string().null())
                    .col(ColumnDef::new(Clientes::SegundoNombre).string().null())
                    .col(ColumnDef::new(Clientes::ApellidoPaterno).string().null())
                    .col(ColumnDef::new(Clientes::ApellidoMaterno).string().null())
                    .col(ColumnDef::new(Clientes::Curp).string_len(18).null())
                    .col(ColumnDef::new(Clientes::FechaNacimiento).date().null())
                    .col(ColumnDef::new(Clientes::Edad).integer().null())
                    .col(ColumnDef::new(Clientes::Genero).string().null())
                    .col(ColumnDef::new(Clientes::EstadoCivil).string().null())
                    .col(ColumnDef::new(Clientes::Telefono).string().null())
                    .col(ColumnDef::new(Clientes::Correo).string().null())
                    .col(ColumnDef::new(Clientes::Pais).string().null())
                    .col(ColumnDef::new(Clientes::Estado).string().null())
                    .col(ColumnDef::new(Clientes::Ciudad).string().null())
                    .col(ColumnDef::new(Clientes::Zona).string().null())
                    .col(ColumnDef::new(Clientes::Ocupacion).string().null())
                    .col(ColumnDef::new(Clientes::AntiguedadLaboral).string().null())
                    .col(ColumnDef::new(Clientes::IngresoMensual).double().null())
                    .col(ColumnDef::new(Clientes::TipoCredito).string().null())
                    .col(ColumnDef::new(Clientes::BuroCredito).string().null())
                    .col(ColumnDef::new(Clientes::PresupuestoMin).double().null())
                    .col(ColumnDef::new(Clientes::PresupuestoMax).double().null())
                    .col(ColumnDef::new(Clientes::NivelEducativo).string().null())
                    .col(ColumnDef::new(Clientes::Hijos).integer().null())
                    .col(ColumnDef::new(Clientes::MetodoCaptacion).string().null())
                    .col(ColumnDef::new(Clientes::OrigenCaptacion).string().null())
                    .col(ColumnDef::new(Clientes::InteresPais).string().null())
                    .col(ColumnDef::new(Clientes::InteresEstado).string().null())
                    .col(ColumnDef::new(Clientes::InteresCiudad).string().null())
                    .col(ColumnDef::new(Clientes::InteresZona).string().null())
                    .col(ColumnDef::new(Clientes::InteresTipo).string().null())
                    .col(ColumnDef::new(Clientes::ZonaInteres).string().null())
                    .col(ColumnDef::new(Clientes::DeudorAlimenticio).boolean().null())
                    .col(ColumnDef::new(Clientes::PropiedadesPrevias).boolean().null())
                    .col(ColumnDef::new(Clientes::NumPropiedadesPrevias).integer().null())
                    .col(ColumnDef::new(Clientes::EdadAdquisicion).integer().null())
                    .col(ColumnDef::new(Clientes::EstadoCliente).string().null())
                    .col(ColumnDef::new(Clientes::TipoCliente).string().null())
                    .col(ColumnDef::new(Clientes::EtapaEmbudo).string().null())
                    .col(ColumnDef::new(Clientes::Score).integer().null())
                    .col(ColumnDef::new(Clientes::AsesorId).integer().null())
                    .col(
                        ColumnDef::new(Clientes::FechaRegistro)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_clientes_curp")
                    .table(Clientes::Table)
                    .col(Clientes::Curp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_clientes_asesor_id")
                    .table(Clientes::Table)
                    .col(Clientes::AsesorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clientes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Clientes {
    Table,
    Id,
    Activo,
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
    Ocupacion,
    AntiguedadLaboral,
    IngresoMensual,
    TipoCredito,
    BuroCredito,
    PresupuestoMin,
    PresupuestoMax,
    NivelEducativo,
    Hijos,
    MetodoCaptacion,
    OrigenCaptacion,
    InteresPais,
    InteresEstado,
    InteresCiudad,
    InteresZona,
    InteresTipo,
    ZonaInteres,
    DeudorAlimenticio,
    PropiedadesPrevias,
    NumPropiedadesPrevias,
    EdadAdquisicion,
    EstadoCliente,
    TipoCliente,
    EtapaEmbudo,
    Score,
    AsesorId,
    FechaRegistro,
}
