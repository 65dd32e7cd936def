//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::layout::LayoutRepository;
use crate::domain::plot::PlotRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::layout_repository::SeaOrmLayoutRepository;
use super::plot_repository::SeaOrmPlotRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let layout = repos.layouts().find_by_id("...").await?;
/// let plots = repos.plots().find_by_layout("...").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    layouts: SeaOrmLayoutRepository,
    plots: SeaOrmPlotRepository,
    bookings: SeaOrmBookingRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            layouts: SeaOrmLayoutRepository::new(db.clone()),
            plots: SeaOrmPlotRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn layouts(&self) -> &dyn LayoutRepository {
        &self.layouts
    }

    fn plots(&self) -> &dyn PlotRepository {
        &self.plots
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
