//! SeaORM implementation of LayoutRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::layout::{Layout, LayoutRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::layout;

use super::db_err;

pub struct SeaOrmLayoutRepository {
    db: DatabaseConnection,
}

impl SeaOrmLayoutRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: layout::Model) -> Layout {
    Layout {
        id: m.id,
        name: m.name,
        location: m.location,
        description: m.description,
        image_url: m.image_url,
        image_width: m.image_width,
        image_height: m.image_height,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(l: Layout) -> layout::ActiveModel {
    layout::ActiveModel {
        id: Set(l.id),
        name: Set(l.name),
        location: Set(l.location),
        description: Set(l.description),
        image_url: Set(l.image_url),
        image_width: Set(l.image_width),
        image_height: Set(l.image_height),
        is_active: Set(l.is_active),
        created_at: Set(l.created_at),
        updated_at: Set(l.updated_at),
    }
}

// ── LayoutRepository impl ───────────────────────────────────────

#[async_trait]
impl LayoutRepository for SeaOrmLayoutRepository {
    async fn save(&self, l: Layout) -> DomainResult<()> {
        debug!("Saving layout: {}", l.id);
        domain_to_active(l).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Layout>> {
        let model = layout::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_active(&self) -> DomainResult<Vec<Layout>> {
        let models = layout::Entity::find()
            .filter(layout::Column::IsActive.eq(true))
            .order_by_desc(layout::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, l: Layout) -> DomainResult<()> {
        debug!("Updating layout: {}", l.id);

        let existing = layout::Entity::find_by_id(&l.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Layout",
                field: "id",
                value: l.id,
            });
        }

        domain_to_active(l).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
