//! Create plots table
//!
//! Plot numbers are unique per layout, enforced by a composite unique
//! index as a backstop behind the service-level check.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_layouts::Layouts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plots::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plots::LayoutId).string().not_null())
                    .col(ColumnDef::new(Plots::PlotNumber).string().not_null())
                    .col(ColumnDef::new(Plots::X).double().not_null())
                    .col(ColumnDef::new(Plots::Y).double().not_null())
                    .col(ColumnDef::new(Plots::Width).double().not_null())
                    .col(ColumnDef::new(Plots::Height).double().not_null())
                    .col(ColumnDef::new(Plots::PolygonCoordinates).text())
                    .col(
                        ColumnDef::new(Plots::Status)
                            .string()
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Plots::Price).double())
                    .col(ColumnDef::new(Plots::Size).string())
                    .col(ColumnDef::new(Plots::Facing).string())
                    .col(ColumnDef::new(Plots::Description).string())
                    .col(
                        ColumnDef::new(Plots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Plots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plots_layout")
                            .from(Plots::Table, Plots::LayoutId)
                            .to(Layouts::Table, Layouts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plots_layout_number")
                    .table(Plots::Table)
                    .col(Plots::LayoutId)
                    .col(Plots::PlotNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_plots_status")
                    .table(Plots::Table)
                    .col(Plots::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Plots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Plots {
    Table,
    Id,
    LayoutId,
    PlotNumber,
    X,
    Y,
    Width,
    Height,
    PolygonCoordinates,
    Status,
    Price,
    Size,
    Facing,
    Description,
    CreatedAt,
    UpdatedAt,
}
