//! Booking repository interface

use async_trait::async_trait;

use super::model::Booking;
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Save a new booking
    async fn save(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// All bookings, newest first
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Booking history for a plot, newest first
    async fn find_by_plot(&self, plot_id: &str) -> DomainResult<Vec<Booking>>;

    /// The confirmed booking for a plot, if any
    async fn find_active_for_plot(&self, plot_id: &str) -> DomainResult<Option<Booking>>;

    /// Update an existing booking
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// Remove a booking record (compensation path only)
    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Remove all bookings of a plot (plot hard-delete path)
    async fn delete_by_plot(&self, plot_id: &str) -> DomainResult<()>;
}
