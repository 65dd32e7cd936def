//! Layout DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Layout, LayoutWithStats, PlotStatusCounts};
use crate::interfaces::http::modules::plots::dto::PlotResponse;

/// A layout as returned on the wire.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResponse {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub image_width: i32,
    pub image_height: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Layout> for LayoutResponse {
    fn from(l: Layout) -> Self {
        Self {
            id: l.id,
            name: l.name,
            location: l.location,
            description: l.description,
            image_url: l.image_url,
            image_width: l.image_width,
            image_height: l.image_height,
            is_active: l.is_active,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// A layout with its plot statistics, for public listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct LayoutListItem {
    #[serde(flatten)]
    pub layout: LayoutResponse,
    pub stats: PlotStatusCounts,
}

impl From<LayoutWithStats> for LayoutListItem {
    fn from(l: LayoutWithStats) -> Self {
        Self {
            layout: l.layout.into(),
            stats: l.stats,
        }
    }
}

/// A layout together with all its plots.
#[derive(Debug, Serialize, ToSchema)]
pub struct LayoutDetailResponse {
    pub layout: LayoutResponse,
    pub plots: Vec<PlotResponse>,
}
