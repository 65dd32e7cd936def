//! SVG adapter: serializes a [`Scene`] into a standalone SVG document
//! that frontends can embed directly.

use std::fmt::Write;

use super::scene::Scene;

/// Escape text for use in XML attribute and text positions.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a scene as a complete SVG document. Infallible: writing into a
/// `String` cannot fail.
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut svg = String::with_capacity(1024 + scene.shapes.len() * 512);

    let _ = write!(
        svg,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:xlink="http://www.w3.org/1999/xlink"
     viewBox="0 0 {w} {h}"
     width="100%" height="100%"
     style="max-width: {w}px;">
  <image href="{image}" width="{w}" height="{h}" />
  <g id="plots">
"#,
        w = scene.canvas.width,
        h = scene.canvas.height,
        image = xml_escape(&scene.canvas.image_url),
    );

    for shape in &scene.shapes {
        let _ = write!(
            svg,
            r#"    <g class="plot" data-plot-id="{id}" data-status="{status}">
      <rect x="{x}" y="{y}" width="{width}" height="{height}"
            fill="{fill}" fill-opacity="{opacity}"
            stroke="{stroke}" stroke-width="2"
            style="cursor: pointer;"
            onclick="window.onPlotClick &amp;&amp; window.onPlotClick('{id}', '{number}', '{status}')"
            onmouseover="this.style.fillOpacity='0.8'"
            onmouseout="this.style.fillOpacity='{opacity}'" />
"#,
            id = xml_escape(&shape.plot_id),
            status = shape.status,
            number = xml_escape(&shape.plot_number),
            x = shape.rect.x,
            y = shape.rect.y,
            width = shape.rect.width,
            height = shape.rect.height,
            fill = shape.fill,
            stroke = shape.stroke,
            opacity = scene.opacity,
        );

        if let Some(label) = &shape.label {
            let _ = write!(
                svg,
                r##"      <text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="middle"
            font-size="{size}px" font-weight="bold"
            fill="#ffffff" stroke="#000000" stroke-width="0.5"
            style="pointer-events: none;">{text}</text>
"##,
                x = label.x,
                y = label.y,
                size = label.font_size,
                text = xml_escape(&label.text),
            );
        }

        svg.push_str("    </g>\n");
    }

    svg.push_str("  </g>\n");

    if let Some(legend) = &scene.legend {
        let height = 30 + legend.len() * 20;
        let _ = write!(
            svg,
            r#"  <g id="legend" transform="translate(10, 10)">
    <rect x="0" y="0" width="120" height="{height}" fill="white" fill-opacity="0.9" rx="5"/>
    <text x="10" y="20" font-size="12" font-weight="bold">Legend</text>
"#,
        );
        for (i, entry) in legend.iter().enumerate() {
            let y = 30 + i * 20;
            let _ = write!(
                svg,
                r#"    <rect x="10" y="{y}" width="20" height="15" fill="{fill}"/>
    <text x="35" y="{text_y}" font-size="11">{label}</text>
"#,
                fill = entry.fill,
                label = entry.label,
                text_y = y + 12,
            );
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>");
    svg
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::scene::{render_scene, SceneOptions};
    use super::*;
    use crate::domain::geometry::Rect;
    use crate::domain::plot::PlotStatus;
    use crate::domain::{Layout, Plot};

    fn scene_with(status: PlotStatus, options: SceneOptions) -> Scene {
        let layout = Layout::new("Phase 1", None, None, "/uploads/p1.png", 1024, 792);
        let plot = Plot::new(
            "L1",
            "101",
            Rect::new(100.0, 100.0, 50.0, 50.0),
            None,
            status,
            None,
            None,
            None,
            None,
        );
        render_scene(&layout, &[plot], options).unwrap()
    }

    #[test]
    fn svg_document_structure() {
        let svg = scene_to_svg(&scene_with(PlotStatus::Available, SceneOptions::default()));
        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 1024 792""#));
        assert!(svg.contains(r#"href="/uploads/p1.png""#));
        assert!(svg.contains(r##"fill="#22c55e""##));
        assert!(svg.contains(r##"stroke="#16a34a""##));
        assert!(svg.contains(r#"fill-opacity="0.6""#));
        assert!(svg.contains(r#"<g id="legend""#));
        // Label: 0.4 * 50 = 20px, centered at (125, 125).
        assert!(svg.contains(r#"font-size="20px""#));
        assert!(svg.contains(r#"x="125" y="125""#));
    }

    #[test]
    fn options_drop_labels_and_legend() {
        let svg = scene_to_svg(&scene_with(
            PlotStatus::Booked,
            SceneOptions {
                show_labels: false,
                show_legend: false,
                opacity: 0.4,
            },
        ));
        assert!(svg.contains(r##"fill="#ef4444""##));
        assert!(svg.contains(r#"fill-opacity="0.4""#));
        assert!(!svg.contains("<text"));
        assert!(!svg.contains("legend"));
    }

    #[test]
    fn plot_numbers_are_escaped() {
        let layout = Layout::new("P", None, None, "/uploads/p.png", 1000, 800);
        let plot = Plot::new(
            "L1",
            "A<1>&\"2\"",
            Rect::new(0.0, 0.0, 10.0, 10.0),
            None,
            PlotStatus::Available,
            None,
            None,
            None,
            None,
        );
        let scene = render_scene(&layout, &[plot], SceneOptions::default()).unwrap();
        let svg = scene_to_svg(&scene);
        assert!(svg.contains("A&lt;1&gt;&amp;&quot;2&quot;"));
        assert!(!svg.contains("A<1>"));
    }
}
