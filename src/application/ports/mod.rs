//! Outbound ports for external collaborators (image storage and probing).

use async_trait::async_trait;

use crate::shared::DomainResult;

/// MIME types accepted for layout plan images.
pub const ALLOWED_IMAGE_MIMES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/svg+xml",
];

/// An image received from an upload, before storage.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub file_name: Option<String>,
}

/// Result of persisting an uploaded image.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Public URL the image is served from
    pub url: String,
    pub filename: String,
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: i32,
    pub height: i32,
}

/// Persists uploaded layout images and hands back their public URL.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn save(&self, bytes: &[u8], mime: &str) -> DomainResult<StoredImage>;
}

/// Probes the pixel dimensions of an uploaded image.
///
/// Pure and CPU-trivial, hence synchronous. For SVG the dimensions come
/// from `width`/`height` attributes or the `viewBox`, falling back to
/// 1000x800 when neither is present.
pub trait ImageProbe: Send + Sync {
    fn dimensions(&self, bytes: &[u8], mime: &str) -> DomainResult<ImageDimensions>;
}
