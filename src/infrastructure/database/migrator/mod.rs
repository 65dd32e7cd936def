//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_layouts;
mod m20250101_000002_create_plots;
mod m20250101_000003_create_bookings;
mod m20250101_000004_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_layouts::Migration),
            Box::new(m20250101_000002_create_plots::Migration),
            Box::new(m20250101_000003_create_bookings::Migration),
            Box::new(m20250101_000004_create_users::Migration),
        ]
    }
}
