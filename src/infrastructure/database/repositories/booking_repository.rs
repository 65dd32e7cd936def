//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus, PaymentStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

use super::db_err;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        plot_id: m.plot_id,
        client_name: m.client_name,
        client_email: m.client_email,
        client_phone: m.client_phone,
        client_address: m.client_address,
        booking_date: m.booking_date,
        status: BookingStatus::from_str_or_cancelled(&m.status),
        payment_status: PaymentStatus::from_str_or_pending(&m.payment_status),
        amount_paid: Decimal::from_f64(m.amount_paid).unwrap_or(Decimal::ZERO),
        notes: m.notes,
        created_by: m.created_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(b: Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        plot_id: Set(b.plot_id),
        client_name: Set(b.client_name),
        client_email: Set(b.client_email),
        client_phone: Set(b.client_phone),
        client_address: Set(b.client_address),
        booking_date: Set(b.booking_date),
        status: Set(b.status.as_str().to_string()),
        payment_status: Set(b.payment_status.as_str().to_string()),
        amount_paid: Set(b.amount_paid.to_f64().unwrap_or(0.0)),
        notes: Set(b.notes),
        created_by: Set(b.created_by),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn save(&self, b: Booking) -> DomainResult<()> {
        debug!("Saving booking: {} for plot {}", b.id, b.plot_id);
        domain_to_active(b).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_plot(&self, plot_id: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::PlotId.eq(plot_id))
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_active_for_plot(&self, plot_id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::PlotId.eq(plot_id))
            .filter(booking::Column::Status.ne("cancelled"))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, b: Booking) -> DomainResult<()> {
        debug!("Updating booking: {}", b.id);

        let existing = booking::Entity::find_by_id(&b.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: b.id,
            });
        }

        domain_to_active(b).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        debug!("Deleting booking: {}", id);
        booking::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_by_plot(&self, plot_id: &str) -> DomainResult<()> {
        debug!("Deleting bookings for plot: {}", plot_id);
        booking::Entity::delete_many()
            .filter(booking::Column::PlotId.eq(plot_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
