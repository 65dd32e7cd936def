//! Pure coordinate-mapping functions for plot rectangles.
//!
//! All plot geometry is stored in the pixel space of the owning layout
//! image. These helpers convert between that canvas space, normalized
//! percentage coordinates (responsive overlays) and on-screen display
//! coordinates (the admin drawing tool).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::{DomainError, DomainResult};

/// Rectangles narrower or shorter than this (in canvas pixels) are
/// rejected by the drawing tool as accidental clicks.
pub const MIN_PLOT_EDGE: f64 = 5.0;

/// A point in canvas or display pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas dimensions (the layout image size in pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn ensure_positive(&self) -> DomainResult<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(DomainError::InvalidDimension(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the rectangle lies entirely within a canvas of the given size.
    pub fn within(&self, canvas: Size) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= canvas.width
            && self.y + self.height <= canvas.height
    }
}

/// A rectangle expressed as percentages of its canvas, for
/// percentage-positioned (responsive) overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NormalizedRect {
    pub left_pct: f64,
    pub top_pct: f64,
    pub width_pct: f64,
    pub height_pct: f64,
}

impl NormalizedRect {
    /// CSS-style percentage strings, two decimal places: `"12.34%"`.
    pub fn css(&self) -> (String, String, String, String) {
        (
            format!("{:.2}%", self.left_pct),
            format!("{:.2}%", self.top_pct),
            format!("{:.2}%", self.width_pct),
            format!("{:.2}%", self.height_pct),
        )
    }
}

/// Convert a canvas-space rectangle into percentages of the canvas.
///
/// Fails with `InvalidDimension` when the canvas is degenerate.
pub fn to_normalized(rect: Rect, canvas: Size) -> DomainResult<NormalizedRect> {
    canvas.ensure_positive()?;
    Ok(NormalizedRect {
        left_pct: rect.x / canvas.width * 100.0,
        top_pct: rect.y / canvas.height * 100.0,
        width_pct: rect.width / canvas.width * 100.0,
        height_pct: rect.height / canvas.height * 100.0,
    })
}

/// Map a display-space point back into canvas pixel space.
///
/// `screen_rect` is the on-screen bounding box of the rendered layout
/// image; the scale factor is `canvas / screen_rect.size`. The result is
/// rounded to the nearest integer pixel, matching the drawing tool.
pub fn to_pixel_point(client: Point, screen_rect: Rect, canvas: Size) -> DomainResult<Point> {
    canvas.ensure_positive()?;
    if screen_rect.width <= 0.0 || screen_rect.height <= 0.0 {
        return Err(DomainError::InvalidDimension(format!(
            "screen rect must be positive, got {}x{}",
            screen_rect.width, screen_rect.height
        )));
    }
    let scale_x = canvas.width / screen_rect.width;
    let scale_y = canvas.height / screen_rect.height;
    Ok(Point::new(
        ((client.x - screen_rect.x) * scale_x).round(),
        ((client.y - screen_rect.y) * scale_y).round(),
    ))
}

/// Build a well-formed rectangle from two arbitrary drag corners.
///
/// Returns `None` when either edge is at or below `min_edge` — too small
/// to be a valid plot.
pub fn normalize_rectangle(p1: Point, p2: Point, min_edge: f64) -> Option<Rect> {
    let rect = Rect::new(
        p1.x.min(p2.x),
        p1.y.min(p2.y),
        (p2.x - p1.x).abs(),
        (p2.y - p1.y).abs(),
    );
    if rect.width <= min_edge || rect.height <= min_edge {
        return None;
    }
    Some(rect)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_rect_percentages() {
        let canvas = Size::new(1000.0, 800.0);
        let n = to_normalized(Rect::new(100.0, 200.0, 50.0, 40.0), canvas).unwrap();
        assert_eq!(n.left_pct, 10.0);
        assert_eq!(n.top_pct, 25.0);
        assert_eq!(n.width_pct, 5.0);
        assert_eq!(n.height_pct, 5.0);
    }

    #[test]
    fn normalized_rect_css_format() {
        let canvas = Size::new(1024.0, 792.0);
        let n = to_normalized(Rect::new(100.0, 100.0, 50.0, 50.0), canvas).unwrap();
        let (left, top, width, height) = n.css();
        assert_eq!(left, "9.77%");
        assert_eq!(top, "12.63%");
        assert_eq!(width, "4.88%");
        assert_eq!(height, "6.31%");
    }

    #[test]
    fn degenerate_canvas_is_rejected() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(matches!(
            to_normalized(rect, Size::new(0.0, 800.0)),
            Err(DomainError::InvalidDimension(_))
        ));
        assert!(matches!(
            to_normalized(rect, Size::new(1000.0, -1.0)),
            Err(DomainError::InvalidDimension(_))
        ));
    }

    #[test]
    fn pixel_point_inverse_scales_and_rounds() {
        // Image displayed at half size, offset by (10, 20) on screen.
        let screen = Rect::new(10.0, 20.0, 500.0, 400.0);
        let canvas = Size::new(1000.0, 800.0);
        let p = to_pixel_point(Point::new(260.0, 220.0), screen, canvas).unwrap();
        assert_eq!(p, Point::new(500.0, 400.0));
    }

    #[test]
    fn pixel_point_rejects_degenerate_screen_rect() {
        let canvas = Size::new(1000.0, 800.0);
        let screen = Rect::new(0.0, 0.0, 0.0, 400.0);
        assert!(matches!(
            to_pixel_point(Point::new(1.0, 1.0), screen, canvas),
            Err(DomainError::InvalidDimension(_))
        ));
    }

    #[test]
    fn normalized_round_trips_within_one_pixel() {
        let canvas = Size::new(1024.0, 792.0);
        let original = Rect::new(137.0, 254.0, 61.0, 47.0);
        let n = to_normalized(original, canvas).unwrap();

        // Project the normalized corners onto a differently-sized screen,
        // then map them back into canvas space.
        let screen = Rect::new(0.0, 0.0, 640.0, 495.0);
        let top_left_on_screen = Point::new(
            n.left_pct / 100.0 * screen.width,
            n.top_pct / 100.0 * screen.height,
        );
        let bottom_right_on_screen = Point::new(
            (n.left_pct + n.width_pct) / 100.0 * screen.width,
            (n.top_pct + n.height_pct) / 100.0 * screen.height,
        );

        let tl = to_pixel_point(top_left_on_screen, screen, canvas).unwrap();
        let br = to_pixel_point(bottom_right_on_screen, screen, canvas).unwrap();

        assert!((tl.x - original.x).abs() <= 1.0);
        assert!((tl.y - original.y).abs() <= 1.0);
        assert!((br.x - (original.x + original.width)).abs() <= 1.0);
        assert!((br.y - (original.y + original.height)).abs() <= 1.0);
    }

    #[test]
    fn normalize_rectangle_orders_corners() {
        let rect =
            normalize_rectangle(Point::new(50.0, 50.0), Point::new(10.0, 10.0), MIN_PLOT_EDGE)
                .unwrap();
        assert_eq!(rect, Rect::new(10.0, 10.0, 40.0, 40.0));
    }

    #[test]
    fn normalize_rectangle_rejects_tiny_drag() {
        // 3x3 drag: accidental click, not a plot.
        assert!(
            normalize_rectangle(Point::new(10.0, 10.0), Point::new(13.0, 13.0), MIN_PLOT_EDGE)
                .is_none()
        );
        // Exactly at the threshold is still rejected.
        assert!(
            normalize_rectangle(Point::new(0.0, 0.0), Point::new(5.0, 100.0), MIN_PLOT_EDGE)
                .is_none()
        );
    }

    #[test]
    fn rect_within_bounds() {
        let canvas = Size::new(1024.0, 792.0);
        assert!(Rect::new(0.0, 0.0, 1024.0, 792.0).within(canvas));
        assert!(Rect::new(100.0, 100.0, 50.0, 50.0).within(canvas));
        assert!(!Rect::new(-1.0, 0.0, 10.0, 10.0).within(canvas));
        assert!(!Rect::new(1000.0, 100.0, 50.0, 50.0).within(canvas));
        assert!(!Rect::new(100.0, 780.0, 50.0, 50.0).within(canvas));
    }
}
