//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub plot_id: String,

    pub client_name: String,

    #[sea_orm(nullable)]
    pub client_email: Option<String>,

    pub client_phone: String,

    #[sea_orm(nullable)]
    pub client_address: Option<String>,

    pub booking_date: DateTimeUtc,

    /// Booking status: pending, confirmed, cancelled
    pub status: String,

    /// Payment status: pending, partial, completed
    pub payment_status: String,

    pub amount_paid: f64,

    #[sea_orm(nullable)]
    pub notes: Option<String>,

    /// Admin who created the booking
    #[sea_orm(nullable)]
    pub created_by: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::plot::Entity",
        from = "Column::PlotId",
        to = "super::plot::Column::Id"
    )]
    Plot,
}

impl Related<super::plot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
