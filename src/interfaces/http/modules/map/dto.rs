//! Map rendering query parameters

use serde::Deserialize;
use utoipa::IntoParams;

use crate::rendering::SceneOptions;

/// Rendering options for the SVG and HTML map views.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MapRenderQuery {
    /// Draw plot-number labels. Default: true
    pub show_labels: Option<bool>,
    /// Draw the status legend. Default: true
    pub show_legend: Option<bool>,
    /// Fill opacity of plot overlays, 0.0 to 1.0. Default: 0.6
    pub opacity: Option<f64>,
}

impl From<MapRenderQuery> for SceneOptions {
    fn from(q: MapRenderQuery) -> Self {
        let defaults = SceneOptions::default();
        Self {
            show_labels: q.show_labels.unwrap_or(defaults.show_labels),
            show_legend: q.show_legend.unwrap_or(defaults.show_legend),
            opacity: q.opacity.unwrap_or(defaults.opacity).clamp(0.0, 1.0),
        }
    }
}
