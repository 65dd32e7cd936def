//! Booking ledger: the plot booking state machine.
//!
//! This service is the only writer of the `booked` plot status (and of
//! the transition back to `available`), so plot availability can never
//! drift from the booking records.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::booking::{Booking, BookingStatus, ClientInfo, PaymentStatus};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Partial update of a booking's payment and client fields. Never
/// transitions the plot.
#[derive(Debug, Clone, Default)]
pub struct BookingUpdate {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub amount_paid: Option<Decimal>,
    pub notes: Option<String>,
}

/// Service for booking operations.
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    /// Per-plot locks serializing the read-check-then-write of a booking
    /// attempt; two concurrent attempts on one plot resolve to exactly
    /// one success.
    plot_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            plot_locks: DashMap::new(),
        }
    }

    fn plot_lock(&self, plot_id: &str) -> Arc<Mutex<()>> {
        self.plot_locks
            .entry(plot_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Book a plot for a client. Fails with `AlreadyBooked` when the plot
    /// is booked; booking insert and plot status write are applied as one
    /// unit under the plot lock.
    pub async fn create(
        &self,
        plot_id: &str,
        client: ClientInfo,
        created_by: Option<String>,
    ) -> DomainResult<Booking> {
        let lock = self.plot_lock(plot_id);
        let _guard = lock.lock().await;

        let mut plot = self
            .repos
            .plots()
            .find_by_id(plot_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Plot", plot_id))?;
        if plot.is_booked() {
            return Err(DomainError::AlreadyBooked);
        }

        let booking = Booking::new(plot_id, client, created_by);
        self.repos.bookings().save(booking.clone()).await?;

        plot.book();
        if let Err(e) = self.repos.plots().update(plot).await {
            // Compensate: a booking must never exist without its plot
            // reflecting `booked`.
            if let Err(del) = self.repos.bookings().delete(&booking.id).await {
                warn!(booking_id = %booking.id, error = %del, "compensation delete failed");
            }
            return Err(e);
        }

        info!(booking_id = %booking.id, plot_id, "booking created");
        Ok(booking)
    }

    /// Cancel a confirmed (or pending) booking and return the plot to the
    /// open market. Cancelled is terminal.
    pub async fn cancel(&self, booking_id: &str) -> DomainResult<Booking> {
        let mut booking = self.require_booking(booking_id).await?;
        if booking.status == BookingStatus::Cancelled {
            return Err(DomainError::Validation(format!(
                "booking {} is already cancelled",
                booking_id
            )));
        }

        let lock = self.plot_lock(&booking.plot_id);
        let _guard = lock.lock().await;

        booking.cancel();
        self.repos.bookings().update(booking.clone()).await?;

        // The plot returns to `available` unconditionally; historical
        // bookings on the same plot are all cancelled by construction.
        if let Some(mut plot) = self.repos.plots().find_by_id(&booking.plot_id).await? {
            plot.release();
            self.repos.plots().update(plot).await?;
        }

        info!(booking_id, plot_id = %booking.plot_id, "booking cancelled");
        Ok(booking)
    }

    /// Free-form field update (payment progress, client details, notes).
    pub async fn update(&self, booking_id: &str, update: BookingUpdate) -> DomainResult<Booking> {
        let mut booking = self.require_booking(booking_id).await?;

        if let Some(name) = update.client_name {
            if name.trim().is_empty() {
                return Err(DomainError::Validation("client_name cannot be empty".into()));
            }
            booking.client_name = name;
        }
        if let Some(email) = update.client_email {
            booking.client_email = Some(email);
        }
        if let Some(phone) = update.client_phone {
            if phone.trim().is_empty() {
                return Err(DomainError::Validation("client_phone cannot be empty".into()));
            }
            booking.client_phone = phone;
        }
        if let Some(address) = update.client_address {
            booking.client_address = Some(address);
        }
        if let Some(payment_status) = update.payment_status {
            booking.payment_status = payment_status;
        }
        if let Some(amount) = update.amount_paid {
            if amount < Decimal::ZERO {
                return Err(DomainError::Validation("amount_paid cannot be negative".into()));
            }
            booking.amount_paid = amount;
        }
        if let Some(notes) = update.notes {
            booking.notes = Some(notes);
        }
        booking.updated_at = chrono::Utc::now();

        self.repos.bookings().update(booking.clone()).await?;
        Ok(booking)
    }

    /// All bookings, newest first.
    pub async fn list(&self) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all().await
    }

    pub async fn get(&self, booking_id: &str) -> DomainResult<Booking> {
        self.require_booking(booking_id).await
    }

    async fn require_booking(&self, id: &str) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))
    }
}

// ── Tests ──────────────────────────────────────────────────────
