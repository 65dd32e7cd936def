//! Map rendering handlers
//!
//! Public read-only views of a layout: a standalone SVG, an HTML page
//! with a positioned overlay, and the raw map data for client renderers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use crate::application::services::LayoutService;
use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::rendering::{build_map_data, render_scene, scene_to_html, scene_to_svg, MapData};

use super::dto::MapRenderQuery;

/// Map handler state
#[derive(Clone)]
pub struct MapState {
    pub layouts: Arc<LayoutService>,
}

/// Render a layout map as SVG
#[utoipa::path(
    get,
    path = "/api/v1/map/{layout_id}/svg",
    tag = "Map",
    params(
        ("layout_id" = String, Path, description = "Layout ID"),
        MapRenderQuery
    ),
    responses(
        (status = 200, description = "SVG document", body = String, content_type = "image/svg+xml"),
        (status = 404, description = "Layout not found")
    )
)]
pub async fn render_svg(
    State(state): State<MapState>,
    Path(layout_id): Path<String>,
    Query(query): Query<MapRenderQuery>,
) -> Result<Response, ApiError> {
    let (layout, plots) = state.layouts.get(&layout_id).await?;
    let scene = render_scene(&layout, &plots, query.into())?;
    let svg = scene_to_svg(&scene);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// Render a layout map as an HTML page
#[utoipa::path(
    get,
    path = "/api/v1/map/{layout_id}/html",
    tag = "Map",
    params(
        ("layout_id" = String, Path, description = "Layout ID"),
        MapRenderQuery
    ),
    responses(
        (status = 200, description = "HTML page", body = String, content_type = "text/html"),
        (status = 404, description = "Layout not found")
    )
)]
pub async fn render_html(
    State(state): State<MapState>,
    Path(layout_id): Path<String>,
    Query(query): Query<MapRenderQuery>,
) -> Result<Html<String>, ApiError> {
    let (layout, plots) = state.layouts.get(&layout_id).await?;
    let scene = render_scene(&layout, &plots, query.into())?;
    Ok(Html(scene_to_html(&scene, &layout.name)))
}

/// Map data for client-side renderers
#[utoipa::path(
    get,
    path = "/api/v1/map/{layout_id}/data",
    tag = "Map",
    params(("layout_id" = String, Path, description = "Layout ID")),
    responses(
        (status = 200, description = "Map data", body = ApiResponse<MapData>),
        (status = 404, description = "Layout not found")
    )
)]
pub async fn map_data(
    State(state): State<MapState>,
    Path(layout_id): Path<String>,
) -> Result<Json<ApiResponse<MapData>>, ApiError> {
    let (layout, plots) = state.layouts.get(&layout_id).await?;
    let data = build_map_data(&layout, &plots)?;
    Ok(Json(ApiResponse::success(data)))
}
