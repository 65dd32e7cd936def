//! Layout repository interface

use async_trait::async_trait;

use super::model::Layout;
use crate::domain::DomainResult;

#[async_trait]
pub trait LayoutRepository: Send + Sync {
    /// Save a new layout
    async fn save(&self, layout: Layout) -> DomainResult<()>;

    /// Find layout by ID (active or not)
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Layout>>;

    /// All active layouts, newest first
    async fn find_active(&self) -> DomainResult<Vec<Layout>>;

    /// Update an existing layout
    async fn update(&self, layout: Layout) -> DomainResult<()>;
}
