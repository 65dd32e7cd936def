pub mod booking;
pub mod layout;
pub mod plot;

pub use booking::{BookingService, BookingUpdate};
pub use layout::{LayoutMeta, LayoutService};
pub use plot::{PlotService, PlotSpec, PlotUpdate};

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixtures for service tests: in-memory repositories, a probe
    //! that always reports a 1024x792 canvas, and an image store that
    //! mints a fresh URL per save.

    use std::sync::Arc;

    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::application::ports::{
        ImageDimensions, ImageProbe, ImageStore, ImageUpload, StoredImage,
    };
    use crate::domain::booking::ClientInfo;
    use crate::domain::{DomainResult, Layout, RepositoryProvider};
    use crate::infrastructure::storage::InMemoryRepositories;

    use super::{BookingService, LayoutService, PlotService, PlotSpec};

    struct StubImageStore;

    #[async_trait]
    impl ImageStore for StubImageStore {
        async fn save(&self, _bytes: &[u8], _mime: &str) -> DomainResult<StoredImage> {
            let filename = format!("{}.png", Uuid::new_v4());
            Ok(StoredImage {
                url: format!("/uploads/{}", filename),
                filename,
            })
        }
    }

    struct StubImageProbe;

    impl ImageProbe for StubImageProbe {
        fn dimensions(&self, _bytes: &[u8], _mime: &str) -> DomainResult<ImageDimensions> {
            Ok(ImageDimensions {
                width: 1024,
                height: 792,
            })
        }
    }

    pub fn layout_service() -> (LayoutService, Arc<InMemoryRepositories>) {
        let repos = Arc::new(InMemoryRepositories::new());
        let svc = LayoutService::new(
            repos.clone(),
            Arc::new(StubImageStore),
            Arc::new(StubImageProbe),
        );
        (svc, repos)
    }

    pub fn plot_service() -> (PlotService, Arc<InMemoryRepositories>) {
        let repos = Arc::new(InMemoryRepositories::new());
        (PlotService::new(repos.clone()), repos)
    }

    pub fn booking_fixture() -> (BookingService, PlotService, Arc<InMemoryRepositories>) {
        let repos = Arc::new(InMemoryRepositories::new());
        (
            BookingService::new(repos.clone()),
            PlotService::new(repos.clone()),
            repos,
        )
    }

    /// Persist a 1024x792 layout and return it.
    pub async fn seed_layout(repos: &Arc<InMemoryRepositories>) -> Layout {
        let layout = Layout::new(
            "Sunrise Meadows",
            Some("East Wing".into()),
            None,
            "/uploads/sunrise.png",
            1024,
            792,
        );
        repos.layouts().save(layout.clone()).await.unwrap();
        layout
    }

    pub fn png_upload() -> ImageUpload {
        ImageUpload {
            bytes: vec![0x89, b'P', b'N', b'G'],
            mime: "image/png".into(),
            file_name: Some("plan.png".into()),
        }
    }

    /// A 50x50 plot at (100,100), inside the seeded canvas.
    pub fn spec(n: &str) -> PlotSpec {
        PlotSpec {
            plot_number: n.to_string(),
            x: 100.0,
            y: 100.0,
            width: 50.0,
            height: 50.0,
            polygon_coordinates: None,
            status: None,
            price: None,
            size: None,
            facing: None,
            description: None,
        }
    }

    pub fn client() -> ClientInfo {
        ClientInfo {
            name: "Asha Rao".into(),
            email: Some("asha@example.com".into()),
            phone: "+91-98450-00000".into(),
            address: Some("12 Lake View Rd".into()),
        }
    }
}
