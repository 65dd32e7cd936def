//! Layout catalog business logic

use std::sync::Arc;

use tracing::info;

use crate::application::ports::{ImageProbe, ImageStore, ImageUpload, ALLOWED_IMAGE_MIMES};
use crate::domain::{DomainError, DomainResult, Layout, LayoutWithStats, Plot, RepositoryProvider};

/// Metadata fields for creating or updating a layout.
#[derive(Debug, Clone, Default)]
pub struct LayoutMeta {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Service for layout catalog operations.
pub struct LayoutService {
    repos: Arc<dyn RepositoryProvider>,
    image_store: Arc<dyn ImageStore>,
    image_probe: Arc<dyn ImageProbe>,
}

impl LayoutService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        image_store: Arc<dyn ImageStore>,
        image_probe: Arc<dyn ImageProbe>,
    ) -> Self {
        Self {
            repos,
            image_store,
            image_probe,
        }
    }

    /// Create a layout from uploaded metadata and plan image. Canvas
    /// dimensions are derived from the image, never user-supplied.
    pub async fn create(&self, meta: LayoutMeta, image: Option<ImageUpload>) -> DomainResult<Layout> {
        let name = meta
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DomainError::Validation("Layout name is required".into()))?
            .to_string();
        let image =
            image.ok_or_else(|| DomainError::Validation("Layout image is required".into()))?;

        let (stored, dims) = self.ingest_image(&image).await?;

        let layout = Layout::new(
            name,
            meta.location,
            meta.description,
            stored.url,
            dims.width,
            dims.height,
        );
        self.repos.layouts().save(layout.clone()).await?;
        info!(layout_id = %layout.id, name = %layout.name, "layout created");
        Ok(layout)
    }

    /// Active layouts with per-status plot counts, recomputed at read time.
    pub async fn list_active(&self) -> DomainResult<Vec<LayoutWithStats>> {
        let layouts = self.repos.layouts().find_active().await?;
        let mut out = Vec::with_capacity(layouts.len());
        for layout in layouts {
            let stats = self.repos.plots().count_by_status(&layout.id).await?;
            out.push(LayoutWithStats { layout, stats });
        }
        Ok(out)
    }

    /// A layout with all its plots, ordered by plot number.
    pub async fn get(&self, id: &str) -> DomainResult<(Layout, Vec<Plot>)> {
        let layout = self
            .repos
            .layouts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Layout", id))?;
        let plots = self.repos.plots().find_by_layout(id).await?;
        Ok((layout, plots))
    }

    /// Partial metadata update; a new image replaces the old one and
    /// re-derives the canvas dimensions.
    pub async fn update(
        &self,
        id: &str,
        meta: LayoutMeta,
        image: Option<ImageUpload>,
    ) -> DomainResult<Layout> {
        let mut layout = self
            .repos
            .layouts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Layout", id))?;

        if let Some(image) = image {
            let (stored, dims) = self.ingest_image(&image).await?;
            layout.replace_image(stored.url, dims.width, dims.height);
        }
        if let Some(name) = meta.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::Validation("Layout name cannot be empty".into()));
            }
            layout.name = name;
        }
        if let Some(location) = meta.location {
            layout.location = Some(location);
        }
        if let Some(description) = meta.description {
            layout.description = Some(description);
        }
        if let Some(is_active) = meta.is_active {
            layout.is_active = is_active;
        }
        layout.updated_at = chrono::Utc::now();

        self.repos.layouts().update(layout.clone()).await?;
        Ok(layout)
    }

    /// Soft delete. Plots keep their own status and are not touched.
    pub async fn deactivate(&self, id: &str) -> DomainResult<()> {
        let mut layout = self
            .repos
            .layouts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Layout", id))?;
        layout.deactivate();
        self.repos.layouts().update(layout).await?;
        info!(layout_id = %id, "layout deactivated");
        Ok(())
    }

    async fn ingest_image(
        &self,
        image: &ImageUpload,
    ) -> DomainResult<(crate::application::ports::StoredImage, crate::application::ports::ImageDimensions)>
    {
        if !ALLOWED_IMAGE_MIMES.contains(&image.mime.as_str()) {
            return Err(DomainError::Validation(format!(
                "Unsupported image type '{}'; allowed: png, jpeg, webp, svg",
                image.mime
            )));
        }
        let dims = self.image_probe.dimensions(&image.bytes, &image.mime)?;
        if dims.width <= 0 || dims.height <= 0 {
            return Err(DomainError::InvalidDimension(format!(
                "probed image dimensions must be positive, got {}x{}",
                dims.width, dims.height
            )));
        }
        let stored = self.image_store.save(&image.bytes, &image.mime).await?;
        Ok((stored, dims))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{layout_service, png_upload, seed_layout};
    use crate::domain::plot::PlotStatus;
    use crate::domain::Plot;

    #[tokio::test]
    async fn create_requires_name_and_image() {
        let (svc, _repos) = layout_service();

        let err = svc
            .create(LayoutMeta::default(), Some(png_upload()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc
            .create(
                LayoutMeta {
                    name: Some("Phase 1".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_derives_dimensions_from_probe() {
        let (svc, _repos) = layout_service();
        let layout = svc
            .create(
                LayoutMeta {
                    name: Some("Phase 1".into()),
                    location: Some("East Wing".into()),
                    ..Default::default()
                },
                Some(png_upload()),
            )
            .await
            .unwrap();
        // The test probe reports 1024x792 regardless of payload.
        assert_eq!((layout.image_width, layout.image_height), (1024, 792));
        assert!(layout.is_active);
    }

    #[tokio::test]
    async fn create_rejects_disallowed_mime() {
        let (svc, _repos) = layout_service();
        let mut upload = png_upload();
        upload.mime = "application/pdf".into();
        let err = svc
            .create(
                LayoutMeta {
                    name: Some("Phase 1".into()),
                    ..Default::default()
                },
                Some(upload),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn list_active_reports_stats() {
        let (svc, repos) = layout_service();
        let layout = seed_layout(&repos).await;

        for (i, status) in [
            PlotStatus::Available,
            PlotStatus::Available,
            PlotStatus::Available,
            PlotStatus::Hold,
            PlotStatus::Booked,
        ]
        .iter()
        .enumerate()
        {
            let plot = Plot::new(
                &layout.id,
                format!("{}", 100 + i),
                crate::domain::geometry::Rect::new(10.0 * i as f64, 0.0, 5.0, 5.0),
                None,
                *status,
                None,
                None,
                None,
                None,
            );
            repos.plots().save(plot).await.unwrap();
        }

        let listed = svc.list_active().await.unwrap();
        assert_eq!(listed.len(), 1);
        let stats = listed[0].stats;
        assert_eq!(stats.total, 5);
        assert_eq!(stats.available, 3);
        assert_eq!(stats.hold, 1);
        assert_eq!(stats.booked, 1);
    }

    #[tokio::test]
    async fn deactivate_hides_from_listing_but_keeps_layout() {
        let (svc, repos) = layout_service();
        let layout = seed_layout(&repos).await;

        svc.deactivate(&layout.id).await.unwrap();
        assert!(svc.list_active().await.unwrap().is_empty());

        // Still retrievable directly.
        let (fetched, _plots) = svc.get(&layout.id).await.unwrap();
        assert!(!fetched.is_active);
    }

    #[tokio::test]
    async fn update_replaces_image_and_rederives_dimensions() {
        let (svc, repos) = layout_service();
        let layout = seed_layout(&repos).await;
        let before_url = layout.image_url.clone();

        let updated = svc
            .update(
                &layout.id,
                LayoutMeta {
                    description: Some("Updated plan".into()),
                    ..Default::default()
                },
                Some(png_upload()),
            )
            .await
            .unwrap();
        assert_ne!(updated.image_url, before_url);
        assert_eq!((updated.image_width, updated.image_height), (1024, 792));
        assert_eq!(updated.description.as_deref(), Some("Updated plan"));
    }

    #[tokio::test]
    async fn get_missing_layout_is_not_found() {
        let (svc, _repos) = layout_service();
        let err = svc.get("nope").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
