//! JSON map export for custom frontend rendering.
//!
//! Field names and enum spellings here are consumed by external
//! frontends and are frozen.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::geometry;
use crate::domain::plot::{PlotStatus, PlotStatusCounts};
use crate::domain::{DomainResult, Layout, Plot};

use super::scene::{status_color, StatusColor};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapLayout {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapCoordinates {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Percentage strings with two decimals and a trailing `%`, e.g. `"9.77%"`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapPercentages {
    pub left: String,
    pub top: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapPlot {
    pub id: String,
    pub plot_number: String,
    pub coordinates: MapCoordinates,
    pub percentages: MapPercentages,
    pub status: PlotStatus,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub size: Option<String>,
    pub facing: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapStats {
    pub total: u64,
    pub available: u64,
    pub hold: u64,
    pub booked: u64,
}

impl From<PlotStatusCounts> for MapStats {
    fn from(c: PlotStatusCounts) -> Self {
        Self {
            total: c.total,
            available: c.available,
            hold: c.hold,
            booked: c.booked,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapStatusColors {
    pub available: StatusColor,
    pub hold: StatusColor,
    pub booked: StatusColor,
}

/// The complete map export payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    pub layout: MapLayout,
    pub plots: Vec<MapPlot>,
    pub stats: MapStats,
    pub status_colors: MapStatusColors,
}

/// Build the JSON map payload from a layout and its plots.
pub fn build_map_data(layout: &Layout, plots: &[Plot]) -> DomainResult<MapData> {
    let canvas = layout.canvas();
    let mut counts = PlotStatusCounts::default();
    let mut out = Vec::with_capacity(plots.len());

    for plot in plots {
        counts.add(plot.status);
        let normalized = geometry::to_normalized(plot.rect(), canvas)?;
        let (left, top, width, height) = normalized.css();
        out.push(MapPlot {
            id: plot.id.clone(),
            plot_number: plot.plot_number.clone(),
            coordinates: MapCoordinates {
                x: plot.x,
                y: plot.y,
                width: plot.width,
                height: plot.height,
            },
            percentages: MapPercentages {
                left,
                top,
                width,
                height,
            },
            status: plot.status,
            price: plot.price,
            size: plot.size.clone(),
            facing: plot.facing.clone(),
            description: plot.description.clone(),
        });
    }

    Ok(MapData {
        layout: MapLayout {
            id: layout.id.clone(),
            name: layout.name.clone(),
            location: layout.location.clone(),
            description: layout.description.clone(),
            image_url: layout.image_url.clone(),
            width: layout.image_width,
            height: layout.image_height,
        },
        plots: out,
        stats: counts.into(),
        status_colors: MapStatusColors {
            available: status_color(PlotStatus::Available),
            hold: status_color(PlotStatus::Hold),
            booked: status_color(PlotStatus::Booked),
        },
    })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Rect;

    #[test]
    fn map_data_wire_shape() {
        let layout = Layout::new(
            "Sunrise Meadows",
            Some("East Wing".into()),
            None,
            "/uploads/sunrise.png",
            1024,
            792,
        );
        let plots = vec![
            Plot::new(
                "L1",
                "101",
                Rect::new(100.0, 100.0, 50.0, 50.0),
                None,
                PlotStatus::Available,
                Some(Decimal::new(2_500_000, 0)),
                Some("30x40".into()),
                Some("East".into()),
                None,
            ),
            Plot::new(
                "L1",
                "102",
                Rect::new(200.0, 100.0, 50.0, 50.0),
                None,
                PlotStatus::Booked,
                None,
                None,
                None,
                None,
            ),
        ];

        let data = build_map_data(&layout, &plots).unwrap();
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["layout"]["name"], "Sunrise Meadows");
        assert_eq!(json["layout"]["imageUrl"], "/uploads/sunrise.png");
        assert_eq!(json["layout"]["width"], 1024);

        let p0 = &json["plots"][0];
        assert_eq!(p0["plotNumber"], "101");
        assert_eq!(p0["coordinates"]["x"], 100.0);
        assert_eq!(p0["percentages"]["left"], "9.77%");
        assert_eq!(p0["percentages"]["top"], "12.63%");
        assert_eq!(p0["status"], "available");
        assert_eq!(p0["size"], "30x40");
        assert_eq!(json["plots"][1]["status"], "booked");

        assert_eq!(json["stats"]["total"], 2);
        assert_eq!(json["stats"]["available"], 1);
        assert_eq!(json["stats"]["booked"], 1);

        assert_eq!(json["statusColors"]["available"]["fill"], "#22c55e");
        assert_eq!(json["statusColors"]["hold"]["stroke"], "#ca8a04");
        assert_eq!(json["statusColors"]["booked"]["label"], "Booked");
    }
}
