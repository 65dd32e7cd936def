//! Plot entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub layout_id: String,

    /// Display number, unique within the layout
    pub plot_number: String,

    /// Rectangle in layout-image pixel space
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    /// Optional polygon outline, serialized as a JSON array of points
    #[sea_orm(nullable)]
    pub polygon_coordinates: Option<String>,

    /// Plot status: available, hold, booked
    pub status: String,

    #[sea_orm(nullable)]
    pub price: Option<f64>,

    #[sea_orm(nullable)]
    pub size: Option<String>,

    #[sea_orm(nullable)]
    pub facing: Option<String>,

    #[sea_orm(nullable)]
    pub description: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::layout::Entity",
        from = "Column::LayoutId",
        to = "super::layout::Column::Id"
    )]
    Layout,

    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::layout::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Layout.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
