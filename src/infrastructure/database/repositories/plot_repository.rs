//! SeaORM implementation of PlotRepository

use async_trait::async_trait;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

use crate::domain::geometry::Point;
use crate::domain::plot::{Plot, PlotRepository, PlotSearch, PlotStatus, PlotStatusCounts};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::plot;

use super::db_err;

pub struct SeaOrmPlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmPlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: plot::Model) -> Plot {
    Plot {
        id: m.id,
        layout_id: m.layout_id,
        plot_number: m.plot_number,
        x: m.x,
        y: m.y,
        width: m.width,
        height: m.height,
        // Lenient parse: a malformed outline degrades to a plain rectangle.
        polygon_coordinates: m
            .polygon_coordinates
            .as_deref()
            .and_then(|s| serde_json::from_str::<Vec<Point>>(s).ok()),
        status: PlotStatus::from_str_or_available(&m.status),
        price: m.price.and_then(Decimal::from_f64),
        size: m.size,
        facing: m.facing,
        description: m.description,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(p: Plot) -> DomainResult<plot::ActiveModel> {
    let polygon = p
        .polygon_coordinates
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| DomainError::Storage(format!("polygon serialization: {}", e)))?;
    Ok(plot::ActiveModel {
        id: Set(p.id),
        layout_id: Set(p.layout_id),
        plot_number: Set(p.plot_number),
        x: Set(p.x),
        y: Set(p.y),
        width: Set(p.width),
        height: Set(p.height),
        polygon_coordinates: Set(polygon),
        status: Set(p.status.as_str().to_string()),
        price: Set(p.price.and_then(|d| d.to_f64())),
        size: Set(p.size),
        facing: Set(p.facing),
        description: Set(p.description),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    })
}

fn number_matches(query: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(plot::Column::PlotNumber)))
        .like(format!("%{}%", query.to_lowercase()))
}

// ── PlotRepository impl ─────────────────────────────────────────

#[async_trait]
impl PlotRepository for SeaOrmPlotRepository {
    async fn save(&self, p: Plot) -> DomainResult<()> {
        debug!("Saving plot: {} ({})", p.id, p.plot_number);
        domain_to_active(p)?.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn save_batch(&self, plots: Vec<Plot>) -> DomainResult<()> {
        debug!("Saving plot batch: {} plots", plots.len());

        let txn = self.db.begin().await.map_err(db_err)?;
        for p in plots {
            domain_to_active(p)?.insert(&txn).await.map_err(db_err)?;
        }
        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Plot>> {
        let model = plot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_layout(&self, layout_id: &str) -> DomainResult<Vec<Plot>> {
        let models = plot::Entity::find()
            .filter(plot::Column::LayoutId.eq(layout_id))
            .order_by_asc(plot::Column::PlotNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_layout_and_number(
        &self,
        layout_id: &str,
        plot_number: &str,
    ) -> DomainResult<Option<Plot>> {
        let model = plot::Entity::find()
            .filter(plot::Column::LayoutId.eq(layout_id))
            .filter(
                Expr::expr(Func::lower(Expr::col(plot::Column::PlotNumber)))
                    .eq(plot_number.to_lowercase()),
            )
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, p: Plot) -> DomainResult<()> {
        debug!("Updating plot: {}", p.id);

        let existing = plot::Entity::find_by_id(&p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Plot",
                field: "id",
                value: p.id,
            });
        }

        domain_to_active(p)?.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        debug!("Deleting plot: {}", id);
        plot::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn search(&self, filter: PlotSearch) -> DomainResult<Vec<Plot>> {
        let mut query = plot::Entity::find();
        if let Some(layout_id) = &filter.layout_id {
            query = query.filter(plot::Column::LayoutId.eq(layout_id));
        }
        if let Some(q) = &filter.query {
            query = query.filter(number_matches(q));
        }
        let models = query
            .order_by_asc(plot::Column::PlotNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count_by_status(&self, layout_id: &str) -> DomainResult<PlotStatusCounts> {
        let models = plot::Entity::find()
            .filter(plot::Column::LayoutId.eq(layout_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut counts = PlotStatusCounts::default();
        for m in models {
            counts.add(PlotStatus::from_str_or_available(&m.status));
        }
        Ok(counts)
    }
}
