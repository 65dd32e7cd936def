//! Create bookings table
//!
//! A plot accumulates booking history; at most one non-cancelled booking
//! at a time is enforced by the booking service.

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_plots::Plots;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::PlotId).string().not_null())
                    .col(ColumnDef::new(Bookings::ClientName).string().not_null())
                    .col(ColumnDef::new(Bookings::ClientEmail).string())
                    .col(ColumnDef::new(Bookings::ClientPhone).string().not_null())
                    .col(ColumnDef::new(Bookings::ClientAddress).string())
                    .col(
                        ColumnDef::new(Bookings::BookingDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("confirmed"),
                    )
                    .col(
                        ColumnDef::new(Bookings::PaymentStatus)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Bookings::AmountPaid)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Bookings::Notes).string())
                    .col(ColumnDef::new(Bookings::CreatedBy).string())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_plot")
                            .from(Bookings::Table, Bookings::PlotId)
                            .to(Plots::Table, Plots::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_plot")
                    .table(Bookings::Table)
                    .col(Bookings::PlotId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    PlotId,
    ClientName,
    ClientEmail,
    ClientPhone,
    ClientAddress,
    BookingDate,
    Status,
    PaymentStatus,
    AmountPaid,
    Notes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
