//! Plot domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::geometry::{Point, Rect};

/// Plot availability status.
///
/// This field is the single source of truth for availability; the wire
/// spellings (`available`, `hold`, `booked`) are part of the external
/// contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    Available,
    Hold,
    Booked,
}

impl PlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Hold => "hold",
            Self::Booked => "booked",
        }
    }

    /// Parse a wire-format status. `None` for anything outside the enum.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "hold" => Some(Self::Hold),
            "booked" => Some(Self::Booked),
            _ => None,
        }
    }

    /// Lenient variant for reading persisted rows.
    pub fn from_str_or_available(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Available)
    }
}

impl std::fmt::Display for PlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable region within a layout.
#[derive(Debug, Clone)]
pub struct Plot {
    pub id: String,
    /// Owning layout
    pub layout_id: String,
    /// Display number, unique within the layout
    pub plot_number: String,
    /// Rectangle in layout-image pixel space
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Optional outline for non-rectangular plots
    pub polygon_coordinates: Option<Vec<Point>>,
    pub status: PlotStatus,
    pub price: Option<Decimal>,
    pub size: Option<String>,
    pub facing: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        layout_id: impl Into<String>,
        plot_number: impl Into<String>,
        rect: Rect,
        polygon_coordinates: Option<Vec<Point>>,
        status: PlotStatus,
        price: Option<Decimal>,
        size: Option<String>,
        facing: Option<String>,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            layout_id: layout_id.into(),
            plot_number: plot_number.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            polygon_coordinates,
            status,
            price,
            size,
            facing,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Mark as booked. Only the booking ledger may call this.
    pub fn book(&mut self) {
        self.status = PlotStatus::Booked;
        self.updated_at = Utc::now();
    }

    /// Return to the open market after a cancelled booking.
    pub fn release(&mut self) {
        self.status = PlotStatus::Available;
        self.updated_at = Utc::now();
    }

    pub fn is_booked(&self) -> bool {
        self.status == PlotStatus::Booked
    }
}

/// Per-status plot counts for a layout, recomputed at read time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PlotStatusCounts {
    pub total: u64,
    pub available: u64,
    pub hold: u64,
    pub booked: u64,
}

impl PlotStatusCounts {
    pub fn add(&mut self, status: PlotStatus) {
        self.total += 1;
        match status {
            PlotStatus::Available => self.available += 1,
            PlotStatus::Hold => self.hold += 1,
            PlotStatus::Booked => self.booked += 1,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plot() -> Plot {
        Plot::new(
            "layout-1",
            "101",
            Rect::new(100.0, 100.0, 50.0, 50.0),
            None,
            PlotStatus::Available,
            None,
            None,
            None,
            None,
        )
    }

    #[test]
    fn new_plot_defaults() {
        let p = sample_plot();
        assert_eq!(p.status, PlotStatus::Available);
        assert_eq!(p.plot_number, "101");
        assert!(!p.is_booked());
    }

    #[test]
    fn book_and_release() {
        let mut p = sample_plot();
        p.book();
        assert!(p.is_booked());
        p.release();
        assert_eq!(p.status, PlotStatus::Available);
    }

    #[test]
    fn status_wire_spelling_roundtrip() {
        for status in [PlotStatus::Available, PlotStatus::Hold, PlotStatus::Booked] {
            assert_eq!(PlotStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PlotStatus::parse("sold"), None);
    }

    #[test]
    fn counts_accumulate_by_status() {
        let mut counts = PlotStatusCounts::default();
        for s in [
            PlotStatus::Available,
            PlotStatus::Available,
            PlotStatus::Available,
            PlotStatus::Hold,
            PlotStatus::Booked,
        ] {
            counts.add(s);
        }
        assert_eq!(counts.total, 5);
        assert_eq!(counts.available, 3);
        assert_eq!(counts.hold, 1);
        assert_eq!(counts.booked, 1);
    }
}
