//! Plot registry business logic

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::geometry::{Point, Rect};
use crate::domain::plot::{Plot, PlotSearch, PlotStatus};
use crate::domain::{Booking, DomainError, DomainResult, Layout, RepositoryProvider};

/// Fields for creating a plot. Geometry is in layout-image pixel space.
#[derive(Debug, Clone)]
pub struct PlotSpec {
    pub plot_number: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub polygon_coordinates: Option<Vec<Point>>,
    pub status: Option<PlotStatus>,
    pub price: Option<Decimal>,
    pub size: Option<String>,
    pub facing: Option<String>,
    pub description: Option<String>,
}

/// Partial update of a plot. `None` leaves a field unchanged. Status is
/// deliberately absent: it moves through `update_status` or the booking
/// ledger only.
#[derive(Debug, Clone, Default)]
pub struct PlotUpdate {
    pub plot_number: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub polygon_coordinates: Option<Vec<Point>>,
    pub price: Option<Decimal>,
    pub size: Option<String>,
    pub facing: Option<String>,
    pub description: Option<String>,
}

/// Service for plot registry operations.
pub struct PlotService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PlotService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Create a single plot under a layout.
    pub async fn create(&self, layout_id: &str, spec: PlotSpec) -> DomainResult<Plot> {
        let layout = self.require_layout(layout_id).await?;
        validate_spec(&spec, &layout)?;

        if self
            .repos
            .plots()
            .find_by_layout_and_number(layout_id, spec.plot_number.trim())
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicatePlotNumber(format!(
                "plot number '{}' already exists in this layout",
                spec.plot_number.trim()
            )));
        }

        let plot = build_plot(layout_id, spec);
        self.repos.plots().save(plot.clone()).await?;
        info!(plot_id = %plot.id, layout_id, plot_number = %plot.plot_number, "plot created");
        Ok(plot)
    }

    /// Create a batch of plots atomically. Every spec is validated before
    /// anything is written; the first violation rejects the whole batch.
    pub async fn create_batch(&self, layout_id: &str, specs: Vec<PlotSpec>) -> DomainResult<Vec<Plot>> {
        if specs.is_empty() {
            return Err(DomainError::Validation("plots array must not be empty".into()));
        }
        let layout = self.require_layout(layout_id).await?;

        let mut seen: HashSet<String> = HashSet::new();
        for (index, spec) in specs.iter().enumerate() {
            validate_spec(spec, &layout).map_err(|e| {
                DomainError::Validation(format!("plot[{}]: {}", index, e))
            })?;
            let number = spec.plot_number.trim().to_lowercase();
            if !seen.insert(number) {
                return Err(DomainError::DuplicatePlotNumber(format!(
                    "plot[{}]: plot number '{}' appears twice in the batch",
                    index,
                    spec.plot_number.trim()
                )));
            }
            if self
                .repos
                .plots()
                .find_by_layout_and_number(layout_id, spec.plot_number.trim())
                .await?
                .is_some()
            {
                return Err(DomainError::DuplicatePlotNumber(format!(
                    "plot[{}]: plot number '{}' already exists in this layout",
                    index,
                    spec.plot_number.trim()
                )));
            }
        }

        let plots: Vec<Plot> = specs
            .into_iter()
            .map(|spec| build_plot(layout_id, spec))
            .collect();
        self.repos.plots().save_batch(plots.clone()).await?;
        info!(layout_id, count = plots.len(), "plot batch created");
        Ok(plots)
    }

    /// A plot with its booking history, newest first.
    pub async fn get(&self, id: &str) -> DomainResult<(Plot, Vec<Booking>)> {
        let plot = self.require_plot(id).await?;
        let bookings = self.repos.bookings().find_by_plot(id).await?;
        Ok((plot, bookings))
    }

    /// Partial update of geometry and sale attributes.
    pub async fn update(&self, id: &str, update: PlotUpdate) -> DomainResult<Plot> {
        let mut plot = self.require_plot(id).await?;
        let layout = self.require_layout(&plot.layout_id).await?;

        if let Some(number) = update.plot_number {
            let number = number.trim().to_string();
            if number.is_empty() {
                return Err(DomainError::Validation("plot_number cannot be empty".into()));
            }
            if !number.eq_ignore_ascii_case(&plot.plot_number) {
                if self
                    .repos
                    .plots()
                    .find_by_layout_and_number(&plot.layout_id, &number)
                    .await?
                    .is_some()
                {
                    return Err(DomainError::DuplicatePlotNumber(format!(
                        "plot number '{}' already exists in this layout",
                        number
                    )));
                }
            }
            plot.plot_number = number;
        }

        if let Some(x) = update.x {
            plot.x = x;
        }
        if let Some(y) = update.y {
            plot.y = y;
        }
        if let Some(width) = update.width {
            plot.width = width;
        }
        if let Some(height) = update.height {
            plot.height = height;
        }
        validate_rect(plot.rect(), &layout)?;

        if let Some(polygon) = update.polygon_coordinates {
            plot.polygon_coordinates = Some(polygon);
        }
        if let Some(price) = update.price {
            plot.price = Some(price);
        }
        if let Some(size) = update.size {
            plot.size = Some(size);
        }
        if let Some(facing) = update.facing {
            plot.facing = Some(facing);
        }
        if let Some(description) = update.description {
            plot.description = Some(description);
        }
        plot.updated_at = chrono::Utc::now();

        self.repos.plots().update(plot.clone()).await?;
        Ok(plot)
    }

    /// Admin status toggle between `available` and `hold`. Transitions
    /// entering or leaving `booked` belong to the booking ledger and are
    /// rejected here, keeping plot status and booking records in sync.
    pub async fn update_status(&self, id: &str, status: PlotStatus) -> DomainResult<Plot> {
        let mut plot = self.require_plot(id).await?;

        if plot.status == status {
            return Ok(plot);
        }
        if status == PlotStatus::Booked || plot.status == PlotStatus::Booked {
            return Err(DomainError::Validation(
                "booked status is managed through bookings; create or cancel a booking instead"
                    .into(),
            ));
        }

        plot.status = status;
        plot.updated_at = chrono::Utc::now();
        self.repos.plots().update(plot.clone()).await?;
        info!(plot_id = %id, status = %status, "plot status updated");
        Ok(plot)
    }

    /// Hard delete. Refused while a confirmed booking exists; cancelled
    /// bookings are removed together with the plot so no orphans remain.
    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let plot = self.require_plot(id).await?;
        if self
            .repos
            .bookings()
            .find_active_for_plot(&plot.id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "plot has an active booking; cancel it before deleting the plot".into(),
            ));
        }
        self.repos.bookings().delete_by_plot(&plot.id).await?;
        self.repos.plots().delete(&plot.id).await?;
        info!(plot_id = %id, "plot deleted");
        Ok(())
    }

    /// Case-insensitive substring search on plot number.
    pub async fn search(&self, filter: PlotSearch) -> DomainResult<Vec<Plot>> {
        self.repos.plots().search(filter).await
    }

    async fn require_layout(&self, layout_id: &str) -> DomainResult<Layout> {
        self.repos
            .layouts()
            .find_by_id(layout_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Layout", layout_id))
    }

    async fn require_plot(&self, id: &str) -> DomainResult<Plot> {
        self.repos
            .plots()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Plot", id))
    }
}

fn build_plot(layout_id: &str, spec: PlotSpec) -> Plot {
    Plot::new(
        layout_id,
        spec.plot_number.trim(),
        Rect::new(spec.x, spec.y, spec.width, spec.height),
        spec.polygon_coordinates,
        spec.status.unwrap_or(PlotStatus::Available),
        spec.price,
        spec.size,
        spec.facing,
        spec.description,
    )
}

fn validate_spec(spec: &PlotSpec, layout: &Layout) -> DomainResult<()> {
    if spec.plot_number.trim().is_empty() {
        return Err(DomainError::Validation("plot_number is required".into()));
    }
    validate_rect(
        Rect::new(spec.x, spec.y, spec.width, spec.height),
        layout,
    )
}

fn validate_rect(rect: Rect, layout: &Layout) -> DomainResult<()> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(DomainError::Validation(format!(
            "plot width and height must be positive, got {}x{}",
            rect.width, rect.height
        )));
    }
    if !rect.within(layout.canvas()) {
        return Err(DomainError::Validation(format!(
            "plot rectangle [{}, {}, {}, {}] exceeds layout canvas {}x{}",
            rect.x, rect.y, rect.width, rect.height, layout.image_width, layout.image_height
        )));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{plot_service, seed_layout, spec};

    #[tokio::test]
    async fn create_defaults_to_available() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;

        let plot = svc.create(&layout.id, spec("101")).await.unwrap();
        assert_eq!(plot.status, PlotStatus::Available);
        assert_eq!(plot.plot_number, "101");
    }

    #[tokio::test]
    async fn create_rejects_unknown_layout() {
        let (svc, _repos) = plot_service();
        let err = svc.create("missing", spec("101")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_number_in_layout() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;

        svc.create(&layout.id, spec("101")).await.unwrap();
        let mut dup = spec("101");
        dup.x = 300.0;
        let err = svc.create(&layout.id, dup).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicatePlotNumber(_)));
    }

    #[tokio::test]
    async fn create_rejects_non_positive_geometry() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;

        let mut bad = spec("101");
        bad.width = 0.0;
        let err = svc.create(&layout.id, bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_out_of_bounds_rect() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await; // 1024x792 canvas

        let mut bad = spec("101");
        bad.x = 1000.0;
        bad.width = 50.0;
        let err = svc.create(&layout.id, bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn batch_is_all_or_nothing() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;

        let mut second = spec("102");
        second.width = 0.0; // invalid
        let err = svc
            .create_batch(&layout.id, vec![spec("101"), second, spec("103")])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Nothing persisted.
        let plots = svc
            .search(PlotSearch {
                layout_id: Some(layout.id.clone()),
                query: None,
            })
            .await
            .unwrap();
        assert!(plots.is_empty());
    }

    #[tokio::test]
    async fn batch_rejects_duplicate_within_batch() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;

        let mut dup = spec("101");
        dup.x = 300.0;
        let err = svc
            .create_batch(&layout.id, vec![spec("101"), dup])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicatePlotNumber(_)));
    }

    #[tokio::test]
    async fn batch_persists_all_on_success() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;

        let created = svc
            .create_batch(&layout.id, vec![spec("101"), spec("102"), spec("103")])
            .await
            .unwrap();
        assert_eq!(created.len(), 3);

        let plots = svc
            .search(PlotSearch {
                layout_id: Some(layout.id.clone()),
                query: None,
            })
            .await
            .unwrap();
        assert_eq!(plots.len(), 3);
    }

    #[tokio::test]
    async fn update_status_toggles_hold() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;
        let plot = svc.create(&layout.id, spec("101")).await.unwrap();

        let held = svc.update_status(&plot.id, PlotStatus::Hold).await.unwrap();
        assert_eq!(held.status, PlotStatus::Hold);
        let back = svc
            .update_status(&plot.id, PlotStatus::Available)
            .await
            .unwrap();
        assert_eq!(back.status, PlotStatus::Available);
    }

    #[tokio::test]
    async fn update_status_cannot_enter_booked_directly() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;
        let plot = svc.create(&layout.id, spec("101")).await.unwrap();

        let err = svc
            .update_status(&plot.id, PlotStatus::Booked)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn update_validates_new_geometry_against_bounds() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;
        let plot = svc.create(&layout.id, spec("101")).await.unwrap();

        let err = svc
            .update(
                &plot.id,
                PlotUpdate {
                    x: Some(1020.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_ordered() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;

        for n in ["B-12", "A-10", "b-11"] {
            let mut s = spec(n);
            s.x = 10.0 * n.len() as f64;
            svc.create(&layout.id, s).await.unwrap();
        }

        let hits = svc
            .search(PlotSearch {
                layout_id: Some(layout.id.clone()),
                query: Some("b-1".into()),
            })
            .await
            .unwrap();
        let numbers: Vec<&str> = hits.iter().map(|p| p.plot_number.as_str()).collect();
        assert_eq!(numbers, vec!["B-12", "b-11"]);

        let none = svc
            .search(PlotSearch {
                layout_id: Some(layout.id.clone()),
                query: Some("zzz".into()),
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_plot() {
        let (svc, repos) = plot_service();
        let layout = seed_layout(&repos).await;
        let plot = svc.create(&layout.id, spec("101")).await.unwrap();

        svc.delete(&plot.id).await.unwrap();
        let err = svc.get(&plot.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
