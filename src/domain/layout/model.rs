//! Layout domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::geometry::Size;
use crate::domain::plot::PlotStatusCounts;

/// A site plan image plus its pixel canvas size, containing plots.
#[derive(Debug, Clone)]
pub struct Layout {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Public URL of the uploaded plan image
    pub image_url: String,
    /// Canvas dimensions, derived from the image — never user-supplied
    pub image_width: i32,
    pub image_height: i32,
    /// Soft-delete flag; inactive layouts are hidden from public listings
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Layout {
    pub fn new(
        name: impl Into<String>,
        location: Option<String>,
        description: Option<String>,
        image_url: impl Into<String>,
        image_width: i32,
        image_height: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            location,
            description,
            image_url: image_url.into(),
            image_width,
            image_height,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn canvas(&self) -> Size {
        Size::new(self.image_width as f64, self.image_height as f64)
    }

    /// Soft delete
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Swap in a replacement image with freshly probed dimensions.
    pub fn replace_image(&mut self, image_url: impl Into<String>, width: i32, height: i32) {
        self.image_url = image_url.into();
        self.image_width = width;
        self.image_height = height;
        self.updated_at = Utc::now();
    }
}

/// Layout with its plot statistics, for public listings.
#[derive(Debug, Clone)]
pub struct LayoutWithStats {
    pub layout: Layout,
    pub stats: PlotStatusCounts,
}

// ── Tests ──────────────────────────────────────────────────────
