//! Image collaborators: filesystem storage for uploaded plan images and
//! dimension probing for rasters and SVG.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::application::ports::{ImageDimensions, ImageProbe, ImageStore, StoredImage};
use crate::domain::{DomainError, DomainResult};

/// Fallback canvas for SVG documents that declare neither `width`/`height`
/// attributes nor a `viewBox`.
pub const SVG_FALLBACK: ImageDimensions = ImageDimensions {
    width: 1000,
    height: 800,
};

fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}

/// Stores uploaded images under a directory served as `/uploads`.
pub struct FsImageStore {
    dir: PathBuf,
    /// URL prefix the directory is served under
    public_prefix: String,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.into(),
        }
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn save(&self, bytes: &[u8], mime: &str) -> DomainResult<StoredImage> {
        let filename = format!("{}.{}", Uuid::new_v4(), extension_for(mime));
        let path = self.dir.join(&filename);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::Storage(format!("creating upload dir: {}", e)))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::Storage(format!("writing {}: {}", path.display(), e)))?;

        debug!("Stored uploaded image: {}", path.display());
        Ok(StoredImage {
            url: format!("{}/{}", self.public_prefix.trim_end_matches('/'), filename),
            filename,
        })
    }
}

/// Default dimension probe: rasters via the `image` crate, SVG via
/// attribute or viewBox parsing.
pub struct DefaultImageProbe;

impl ImageProbe for DefaultImageProbe {
    fn dimensions(&self, bytes: &[u8], mime: &str) -> DomainResult<ImageDimensions> {
        if mime == "image/svg+xml" {
            return Ok(svg_dimensions(bytes));
        }
        let img = image::load_from_memory(bytes)
            .map_err(|e| DomainError::Validation(format!("unreadable image: {}", e)))?;
        Ok(ImageDimensions {
            width: img.width() as i32,
            height: img.height() as i32,
        })
    }
}

/// Parse an SVG's pixel dimensions from its root element.
///
/// Order of precedence: `width`/`height` attributes, then `viewBox`, then
/// [`SVG_FALLBACK`]. Never fails: SVG without usable dimensions still
/// renders, just at the fallback canvas size.
fn svg_dimensions(bytes: &[u8]) -> ImageDimensions {
    let text = String::from_utf8_lossy(bytes);
    let Some(tag) = svg_root_tag(&text) else {
        return SVG_FALLBACK;
    };

    let width = attr_value(tag, "width").and_then(parse_px);
    let height = attr_value(tag, "height").and_then(parse_px);
    if let (Some(w), Some(h)) = (width, height) {
        return ImageDimensions {
            width: w,
            height: h,
        };
    }

    if let Some(vb) = attr_value(tag, "viewBox") {
        let parts: Vec<f64> = vb
            .split_whitespace()
            .filter_map(|p| p.parse().ok())
            .collect();
        if parts.len() == 4 && parts[2] > 0.0 && parts[3] > 0.0 {
            return ImageDimensions {
                width: parts[2].round() as i32,
                height: parts[3].round() as i32,
            };
        }
    }

    SVG_FALLBACK
}

/// The opening `<svg ...>` tag, without its closing bracket.
fn svg_root_tag(text: &str) -> Option<&str> {
    let start = text.find("<svg")?;
    let rest = &text[start..];
    let end = rest.find('>')?;
    Some(&rest[..end])
}

fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let pattern = format!("{}=\"", name);
    let start = tag.find(&pattern)? + pattern.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// Parse a dimension value, tolerating a `px` suffix. Percentages and
/// other relative units are treated as absent.
fn parse_px(value: &str) -> Option<i32> {
    let trimmed = value.trim().trim_end_matches("px");
    let n: f64 = trimmed.parse().ok()?;
    if n > 0.0 {
        Some(n.round() as i32)
    } else {
        None
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_width_height_attributes() {
        let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="1024px" height="792" viewBox="0 0 10 10"></svg>"#;
        let d = svg_dimensions(svg);
        assert_eq!((d.width, d.height), (1024, 792));
    }

    #[test]
    fn svg_viewbox_fallback() {
        let svg = br#"<svg viewBox="0 0 640 480"><rect/></svg>"#;
        let d = svg_dimensions(svg);
        assert_eq!((d.width, d.height), (640, 480));
    }

    #[test]
    fn svg_default_when_undeclared() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="5"/></svg>"#;
        let d = svg_dimensions(svg);
        assert_eq!((d.width, d.height), (1000, 800));
    }

    #[test]
    fn svg_percentage_width_falls_through_to_viewbox() {
        let svg = br#"<svg width="100%" height="100%" viewBox="0 0 300 200"></svg>"#;
        let d = svg_dimensions(svg);
        assert_eq!((d.width, d.height), (300, 200));
    }

    #[test]
    fn not_an_svg_gets_fallback() {
        assert_eq!(svg_dimensions(b"plain text"), SVG_FALLBACK);
    }

    #[tokio::test]
    async fn fs_store_writes_and_returns_public_url() {
        let dir = std::env::temp_dir().join(format!("plotmap-test-{}", Uuid::new_v4()));
        let store = FsImageStore::new(&dir, "/uploads");

        let stored = store.save(b"\x89PNG", "image/png").await.unwrap();
        assert!(stored.url.starts_with("/uploads/"));
        assert!(stored.filename.ends_with(".png"));
        assert!(dir.join(&stored.filename).exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
