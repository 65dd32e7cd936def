//! Booking DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::BookingUpdate;
use crate::domain::{Booking, BookingStatus, ClientInfo, PaymentStatus};

/// A booking as returned on the wire.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub plot_id: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: String,
    pub client_address: Option<String>,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    #[schema(value_type = f64)]
    pub amount_paid: Decimal,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            plot_id: b.plot_id,
            client_name: b.client_name,
            client_email: b.client_email,
            client_phone: b.client_phone,
            client_address: b.client_address,
            booking_date: b.booking_date,
            status: b.status,
            payment_status: b.payment_status,
            amount_paid: b.amount_paid,
            notes: b.notes,
            created_by: b.created_by,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Create booking request. Books the plot for the named client.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 100))]
    pub plot_id: String,
    #[validate(length(min = 1, max = 200))]
    pub client_name: String,
    #[validate(email)]
    pub client_email: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub client_phone: String,
    #[validate(length(max = 500))]
    pub client_address: Option<String>,
}

impl CreateBookingRequest {
    pub fn client_info(&self) -> ClientInfo {
        ClientInfo {
            name: self.client_name.clone(),
            email: self.client_email.clone(),
            phone: self.client_phone.clone(),
            address: self.client_address.clone(),
        }
    }
}

/// Partial booking update. Omitted fields stay unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[validate(length(min = 1, max = 200))]
    pub client_name: Option<String>,
    #[validate(email)]
    pub client_email: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub client_phone: Option<String>,
    #[validate(length(max = 500))]
    pub client_address: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    #[schema(value_type = Option<f64>)]
    pub amount_paid: Option<Decimal>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl From<UpdateBookingRequest> for BookingUpdate {
    fn from(r: UpdateBookingRequest) -> Self {
        Self {
            client_name: r.client_name,
            client_email: r.client_email,
            client_phone: r.client_phone,
            client_address: r.client_address,
            payment_status: r.payment_status,
            amount_paid: r.amount_paid,
            notes: r.notes,
        }
    }
}
