//! Create layouts table
//!
//! A layout is a site plan image plus its pixel canvas size; plots are
//! drawn against that canvas.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Layouts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Layouts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Layouts::Name).string().not_null())
                    .col(ColumnDef::new(Layouts::Location).string())
                    .col(ColumnDef::new(Layouts::Description).string())
                    .col(ColumnDef::new(Layouts::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Layouts::ImageWidth).integer().not_null())
                    .col(ColumnDef::new(Layouts::ImageHeight).integer().not_null())
                    .col(
                        ColumnDef::new(Layouts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Layouts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Layouts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_layouts_is_active")
                    .table(Layouts::Table)
                    .col(Layouts::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Layouts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Layouts {
    Table,
    Id,
    Name,
    Location,
    Description,
    ImageUrl,
    ImageWidth,
    ImageHeight,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
