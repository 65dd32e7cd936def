//! Booking domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Booking lifecycle status. `cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn from_str_or_cancelled(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Cancelled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment progress, independent of the booking lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Partial => "partial",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "partial" => Some(Self::Partial),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn from_str_or_pending(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Pending)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client details captured when an admin books a plot.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
}

/// A client's claim on a plot.
///
/// A plot may accumulate many bookings over its history (rebooking after
/// cancellation) but at most one `confirmed` booking at a time; the
/// booking service enforces that, not a uniqueness constraint.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: String,
    pub plot_id: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: String,
    pub client_address: Option<String>,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub amount_paid: Decimal,
    pub notes: Option<String>,
    /// Admin who created the booking
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// New bookings are created directly as `confirmed`; `pending` exists
    /// in the data model but is never produced by the transition API.
    pub fn new(plot_id: impl Into<String>, client: ClientInfo, created_by: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            plot_id: plot_id.into(),
            client_name: client.name,
            client_email: client.email,
            client_phone: client.phone,
            client_address: client.address,
            booking_date: now,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
            amount_paid: Decimal::ZERO,
            notes: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
        self.updated_at = Utc::now();
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ClientInfo {
        ClientInfo {
            name: "R. Sharma".into(),
            email: Some("r.sharma@example.com".into()),
            phone: "+91-90000-00001".into(),
            address: None,
        }
    }

    #[test]
    fn new_booking_is_confirmed() {
        let b = Booking::new("plot-1", client(), Some("admin-1".into()));
        assert_eq!(b.status, BookingStatus::Confirmed);
        assert_eq!(b.payment_status, PaymentStatus::Pending);
        assert_eq!(b.amount_paid, Decimal::ZERO);
        assert!(b.is_active());
    }

    #[test]
    fn cancel_is_terminal() {
        let mut b = Booking::new("plot-1", client(), None);
        b.cancel();
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert!(!b.is_active());
    }

    #[test]
    fn wire_spellings() {
        assert_eq!(BookingStatus::Confirmed.as_str(), "confirmed");
        assert_eq!(PaymentStatus::Partial.as_str(), "partial");
        assert_eq!(BookingStatus::parse("void"), None);
        assert_eq!(PaymentStatus::parse("paid"), None);
    }
}
