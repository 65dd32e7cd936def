//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories; consumers request only the repository they need.

use super::booking::BookingRepository;
use super::layout::LayoutRepository;
use super::plot::PlotRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let layout = repos.layouts().find_by_id("...").await?;
///     let plots = repos.plots().find_by_layout(&layout.id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn layouts(&self) -> &dyn LayoutRepository;
    fn plots(&self) -> &dyn PlotRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn users(&self) -> &dyn UserRepository;
}
