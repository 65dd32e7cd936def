//! Scene construction: projecting a layout and its plots into a
//! format-neutral description of rectangles, colors, and labels.
//!
//! The scene carries everything a rendering target needs; the SVG and
//! HTML adapters are plain serializers over it and hold no logic of
//! their own.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::geometry::{self, NormalizedRect, Point, Rect};
use crate::domain::plot::PlotStatus;
use crate::domain::{DomainResult, Layout, Plot};

/// Default fill opacity of plot overlays.
pub const DEFAULT_OPACITY: f64 = 0.6;

/// Fill, stroke and display label for a plot status. The hex values are
/// part of the external contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusColor {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub label: &'static str,
}

/// Fixed status-to-color lookup.
pub fn status_color(status: PlotStatus) -> StatusColor {
    match status {
        PlotStatus::Available => StatusColor {
            fill: "#22c55e",
            stroke: "#16a34a",
            label: "Available",
        },
        PlotStatus::Hold => StatusColor {
            fill: "#eab308",
            stroke: "#ca8a04",
            label: "On Hold",
        },
        PlotStatus::Booked => StatusColor {
            fill: "#ef4444",
            stroke: "#dc2626",
            label: "Booked",
        },
    }
}

/// Rendering options, all defaulted for the common embed case.
#[derive(Debug, Clone, Copy)]
pub struct SceneOptions {
    pub show_labels: bool,
    pub show_legend: bool,
    pub opacity: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            show_labels: true,
            show_legend: true,
            opacity: DEFAULT_OPACITY,
        }
    }
}

/// The drawing surface: layout image plus its pixel dimensions.
#[derive(Debug, Clone, Serialize)]
pub struct SceneCanvas {
    pub width: i32,
    pub height: i32,
    pub image_url: String,
}

/// A centered plot-number label.
#[derive(Debug, Clone, Serialize)]
pub struct SceneLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
}

/// One plot projected onto the canvas.
#[derive(Debug, Clone, Serialize)]
pub struct SceneShape {
    pub plot_id: String,
    pub plot_number: String,
    pub rect: Rect,
    pub normalized: NormalizedRect,
    pub status: PlotStatus,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub label: Option<SceneLabel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub fill: &'static str,
    pub label: &'static str,
}

/// Format-neutral projection of a layout and its plots.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub canvas: SceneCanvas,
    pub shapes: Vec<SceneShape>,
    pub legend: Option<Vec<LegendEntry>>,
    pub opacity: f64,
}

/// Project a layout and its plots into a [`Scene`].
///
/// Fails with `InvalidDimension` when the layout canvas is degenerate.
pub fn render_scene(layout: &Layout, plots: &[Plot], options: SceneOptions) -> DomainResult<Scene> {
    let canvas = layout.canvas();
    let mut shapes = Vec::with_capacity(plots.len());

    for plot in plots {
        let rect = plot.rect();
        let normalized = geometry::to_normalized(rect, canvas)?;
        let color = status_color(plot.status);

        let label = options.show_labels.then(|| {
            let Point { x, y } = rect.center();
            SceneLabel {
                text: plot.plot_number.clone(),
                x,
                y,
                // Scales with the plot so numbers stay legible on both
                // tiny and huge plots.
                font_size: 0.4 * rect.width.min(rect.height),
            }
        });

        shapes.push(SceneShape {
            plot_id: plot.id.clone(),
            plot_number: plot.plot_number.clone(),
            rect,
            normalized,
            status: plot.status,
            fill: color.fill,
            stroke: color.stroke,
            label,
        });
    }

    let legend = options.show_legend.then(|| {
        [PlotStatus::Available, PlotStatus::Hold, PlotStatus::Booked]
            .into_iter()
            .map(|s| {
                let c = status_color(s);
                LegendEntry {
                    fill: c.fill,
                    label: c.label,
                }
            })
            .collect()
    });

    Ok(Scene {
        canvas: SceneCanvas {
            width: layout.image_width,
            height: layout.image_height,
            image_url: layout.image_url.clone(),
        },
        shapes,
        legend,
        opacity: options.opacity,
    })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Rect;

    fn layout() -> Layout {
        Layout::new("Sunrise Meadows", None, None, "/uploads/sunrise.png", 1024, 792)
    }

    fn plot(number: &str, rect: Rect, status: PlotStatus) -> Plot {
        Plot::new("L1", number, rect, None, status, None, None, None, None)
    }

    #[test]
    fn scene_maps_status_to_fixed_colors() {
        let plots = vec![
            plot("101", Rect::new(100.0, 100.0, 50.0, 50.0), PlotStatus::Available),
            plot("102", Rect::new(200.0, 100.0, 50.0, 50.0), PlotStatus::Hold),
            plot("103", Rect::new(300.0, 100.0, 50.0, 50.0), PlotStatus::Booked),
        ];
        let scene = render_scene(&layout(), &plots, SceneOptions::default()).unwrap();

        let fills: Vec<&str> = scene.shapes.iter().map(|s| s.fill).collect();
        assert_eq!(fills, vec!["#22c55e", "#eab308", "#ef4444"]);
        let strokes: Vec<&str> = scene.shapes.iter().map(|s| s.stroke).collect();
        assert_eq!(strokes, vec!["#16a34a", "#ca8a04", "#dc2626"]);
    }

    #[test]
    fn label_font_scales_with_shorter_edge() {
        let plots = vec![plot("7", Rect::new(0.0, 0.0, 80.0, 30.0), PlotStatus::Available)];
        let scene = render_scene(&layout(), &plots, SceneOptions::default()).unwrap();

        let label = scene.shapes[0].label.as_ref().unwrap();
        assert_eq!(label.font_size, 12.0); // 0.4 * min(80, 30)
        assert_eq!((label.x, label.y), (40.0, 15.0)); // centered
        assert_eq!(label.text, "7");
    }

    #[test]
    fn options_suppress_labels_and_legend() {
        let plots = vec![plot("101", Rect::new(0.0, 0.0, 10.0, 10.0), PlotStatus::Available)];
        let scene = render_scene(
            &layout(),
            &plots,
            SceneOptions {
                show_labels: false,
                show_legend: false,
                opacity: 0.3,
            },
        )
        .unwrap();
        assert!(scene.shapes[0].label.is_none());
        assert!(scene.legend.is_none());
        assert_eq!(scene.opacity, 0.3);
    }

    #[test]
    fn legend_lists_all_three_statuses() {
        let scene = render_scene(&layout(), &[], SceneOptions::default()).unwrap();
        let legend = scene.legend.unwrap();
        let labels: Vec<&str> = legend.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Available", "On Hold", "Booked"]);
    }

    #[test]
    fn degenerate_canvas_is_rejected() {
        let mut bad = layout();
        bad.image_width = 0;
        let plots = vec![plot("101", Rect::new(0.0, 0.0, 10.0, 10.0), PlotStatus::Available)];
        assert!(render_scene(&bad, &plots, SceneOptions::default()).is_err());
    }

    #[test]
    fn normalized_percentages_follow_canvas() {
        let plots = vec![plot("101", Rect::new(100.0, 100.0, 50.0, 50.0), PlotStatus::Available)];
        let scene = render_scene(&layout(), &plots, SceneOptions::default()).unwrap();
        let (left, top, width, height) = scene.shapes[0].normalized.css();
        assert_eq!(
            (left.as_str(), top.as_str(), width.as_str(), height.as_str()),
            ("9.77%", "12.63%", "4.88%", "6.31%")
        );
    }
}
