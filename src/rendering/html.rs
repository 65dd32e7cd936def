//! HTML adapter: serializes a [`Scene`] into a standalone page with a
//! percentage-positioned div overlay, suitable for iframe embedding.

use std::fmt::Write;

use super::scene::Scene;

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a scene as a complete HTML page. Plot overlays are positioned
/// with percentages so the map scales with its container.
pub fn scene_to_html(scene: &Scene, title: &str) -> String {
    let mut html = String::with_capacity(2048 + scene.shapes.len() * 256);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
    * {{ margin: 0; padding: 0; box-sizing: border-box; }}
    body {{ font-family: Arial, sans-serif; background: #1a1a1a; }}
    .map-container {{ position: relative; width: 100%; max-width: {w}px; margin: 0 auto; }}
    .layout-image {{ width: 100%; display: block; user-select: none; }}
    .plots-overlay {{ position: absolute; top: 0; left: 0; width: 100%; height: 100%; }}
    .plot {{
      position: absolute; border: 2px solid; cursor: pointer;
      display: flex; align-items: center; justify-content: center;
      font-weight: bold; font-size: 12px; color: white;
      text-shadow: 1px 1px 2px black; transition: all 0.2s ease;
    }}
    .plot:hover {{ transform: scale(1.05); z-index: 100; }}
    .plot.available {{ background: rgba(34, 197, 94, {op}); border-color: #16a34a; }}
    .plot.hold {{ background: rgba(234, 179, 8, {op}); border-color: #ca8a04; }}
    .plot.booked {{ background: rgba(239, 68, 68, {op}); border-color: #dc2626; }}
    .legend {{
      position: fixed; top: 10px; right: 10px; background: white;
      padding: 15px; border-radius: 8px; z-index: 1000;
    }}
    .legend h4 {{ margin-bottom: 10px; }}
    .legend-item {{ display: flex; align-items: center; margin: 5px 0; }}
    .legend-color {{ width: 20px; height: 20px; margin-right: 8px; border-radius: 3px; }}
  </style>
</head>
<body>
  <div class="map-container">
    <div class="map-wrapper">
      <img src="{image}" alt="{title}" class="layout-image">
      <div class="plots-overlay">
"#,
        title = html_escape(title),
        w = scene.canvas.width,
        op = scene.opacity,
        image = html_escape(&scene.canvas.image_url),
    );

    for shape in &scene.shapes {
        let (left, top, width, height) = shape.normalized.css();
        let text = if shape.label.is_some() {
            html_escape(&shape.plot_number)
        } else {
            String::new()
        };
        let _ = write!(
            html,
            r#"        <div class="plot {status}" data-plot-id="{id}" title="Plot {number}: {status}"
             style="left: {left}; top: {top}; width: {width}; height: {height};">{text}</div>
"#,
            status = shape.status,
            id = html_escape(&shape.plot_id),
            number = html_escape(&shape.plot_number),
        );
    }

    html.push_str("      </div>\n    </div>\n  </div>\n");

    if let Some(legend) = &scene.legend {
        html.push_str("  <div class=\"legend\">\n    <h4>Legend</h4>\n");
        for entry in legend {
            let _ = write!(
                html,
                "    <div class=\"legend-item\"><div class=\"legend-color\" style=\"background:{}\"></div> {}</div>\n",
                entry.fill, entry.label,
            );
        }
        html.push_str("  </div>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::scene::{render_scene, SceneOptions};
    use super::*;
    use crate::domain::geometry::Rect;
    use crate::domain::plot::PlotStatus;
    use crate::domain::{Layout, Plot};

    #[test]
    fn overlay_uses_percentage_positions() {
        let layout = Layout::new("Phase 1", None, None, "/uploads/p1.png", 1024, 792);
        let plot = Plot::new(
            "L1",
            "101",
            Rect::new(100.0, 100.0, 50.0, 50.0),
            None,
            PlotStatus::Hold,
            None,
            None,
            None,
            None,
        );
        let scene = render_scene(&layout, &[plot], SceneOptions::default()).unwrap();
        let html = scene_to_html(&scene, "Phase 1 - Interactive Map");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("left: 9.77%; top: 12.63%; width: 4.88%; height: 6.31%;"));
        assert!(html.contains(r#"class="plot hold""#));
        assert!(html.contains(">101</div>"));
        assert!(html.contains("Legend"));
    }

    #[test]
    fn hiding_labels_leaves_overlay_text_empty() {
        let layout = Layout::new("P", None, None, "/uploads/p.png", 1000, 800);
        let plot = Plot::new(
            "L1",
            "7",
            Rect::new(0.0, 0.0, 100.0, 100.0),
            None,
            PlotStatus::Available,
            None,
            None,
            None,
            None,
        );
        let scene = render_scene(
            &layout,
            &[plot],
            SceneOptions {
                show_labels: false,
                show_legend: false,
                opacity: 0.6,
            },
        )
        .unwrap();
        let html = scene_to_html(&scene, "P");
        assert!(html.contains(r#"height: 12.50%;"></div>"#));
        assert!(!html.contains("Legend"));
    }
}
