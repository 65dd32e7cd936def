//! Plot repository interface

use async_trait::async_trait;

use super::model::{Plot, PlotStatusCounts};
use crate::domain::DomainResult;

/// Search filter for plots.
#[derive(Debug, Clone, Default)]
pub struct PlotSearch {
    /// Restrict to a single layout
    pub layout_id: Option<String>,
    /// Case-insensitive substring match on `plot_number`
    pub query: Option<String>,
}

#[async_trait]
pub trait PlotRepository: Send + Sync {
    /// Save a new plot
    async fn save(&self, plot: Plot) -> DomainResult<()>;

    /// Save a batch of plots atomically (all-or-nothing)
    async fn save_batch(&self, plots: Vec<Plot>) -> DomainResult<()>;

    /// Find plot by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Plot>>;

    /// All plots of a layout, ordered by `plot_number` ascending
    async fn find_by_layout(&self, layout_id: &str) -> DomainResult<Vec<Plot>>;

    /// Find a plot by its number within a layout
    async fn find_by_layout_and_number(
        &self,
        layout_id: &str,
        plot_number: &str,
    ) -> DomainResult<Option<Plot>>;

    /// Update an existing plot
    async fn update(&self, plot: Plot) -> DomainResult<()>;

    /// Hard-delete a plot
    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Search plots, ordered by `plot_number` ascending
    async fn search(&self, filter: PlotSearch) -> DomainResult<Vec<Plot>>;

    /// Per-status counts for a layout
    async fn count_by_status(&self, layout_id: &str) -> DomainResult<PlotStatusCounts>;
}
