//! Plot DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::services::{PlotSpec, PlotUpdate};
use crate::domain::geometry::Point;
use crate::domain::plot::{Plot, PlotSearch, PlotStatus};
use crate::interfaces::http::modules::bookings::dto::BookingResponse;

/// A plot as returned on the wire.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlotResponse {
    pub id: String,
    pub layout_id: String,
    pub plot_number: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub polygon_coordinates: Option<Vec<Point>>,
    pub status: PlotStatus,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub size: Option<String>,
    pub facing: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Plot> for PlotResponse {
    fn from(p: Plot) -> Self {
        Self {
            id: p.id,
            layout_id: p.layout_id,
            plot_number: p.plot_number,
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
            polygon_coordinates: p.polygon_coordinates,
            status: p.status,
            price: p.price,
            size: p.size,
            facing: p.facing,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// A plot together with its booking history, newest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlotDetailResponse {
    pub plot: PlotResponse,
    pub bookings: Vec<BookingResponse>,
}

/// Create plot request. Geometry is in layout-image pixel space.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlotRequest {
    #[validate(length(min = 1, max = 50))]
    pub plot_number: String,
    pub x: f64,
    pub y: f64,
    #[validate(range(min = 0.0))]
    pub width: f64,
    #[validate(range(min = 0.0))]
    pub height: f64,
    pub polygon_coordinates: Option<Vec<Point>>,
    pub status: Option<PlotStatus>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub size: Option<String>,
    pub facing: Option<String>,
    pub description: Option<String>,
}

impl From<CreatePlotRequest> for PlotSpec {
    fn from(r: CreatePlotRequest) -> Self {
        Self {
            plot_number: r.plot_number,
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
            polygon_coordinates: r.polygon_coordinates,
            status: r.status,
            price: r.price,
            size: r.size,
            facing: r.facing,
            description: r.description,
        }
    }
}

/// Batch create request; the whole batch is applied or rejected.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BatchCreatePlotsRequest {
    #[validate(length(min = 1, max = 500), nested)]
    pub plots: Vec<CreatePlotRequest>,
}

/// Partial plot update. Omitted fields stay unchanged. Status is not
/// updatable here; use the status endpoint or the booking endpoints.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlotRequest {
    #[validate(length(min = 1, max = 50))]
    pub plot_number: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub polygon_coordinates: Option<Vec<Point>>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub size: Option<String>,
    pub facing: Option<String>,
    pub description: Option<String>,
}

impl From<UpdatePlotRequest> for PlotUpdate {
    fn from(r: UpdatePlotRequest) -> Self {
        Self {
            plot_number: r.plot_number,
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
            polygon_coordinates: r.polygon_coordinates,
            price: r.price,
            size: r.size,
            facing: r.facing,
            description: r.description,
        }
    }
}

/// Status toggle request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePlotStatusRequest {
    pub status: PlotStatus,
}

/// Plot search query
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PlotSearchQuery {
    /// Restrict to a single layout
    pub layout_id: Option<String>,
    /// Case-insensitive substring match on plot number
    pub q: Option<String>,
}

impl From<PlotSearchQuery> for PlotSearch {
    fn from(q: PlotSearchQuery) -> Self {
        Self {
            layout_id: q.layout_id,
            query: q.q,
        }
    }
}
