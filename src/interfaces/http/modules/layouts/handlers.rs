//! Layout handlers
//!
//! Create and update take `multipart/form-data`: text fields for the
//! metadata plus an `image` part carrying the plan image.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::Json;

use crate::application::ports::ImageUpload;
use crate::application::services::{LayoutMeta, LayoutService};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData};

use super::dto::{LayoutDetailResponse, LayoutListItem, LayoutResponse};

/// Layouts handler state
#[derive(Clone)]
pub struct LayoutsState {
    pub service: Arc<LayoutService>,
}

/// List active layouts with plot statistics
#[utoipa::path(
    get,
    path = "/api/v1/layouts",
    tag = "Layouts",
    responses(
        (status = 200, description = "Active layouts", body = ApiResponse<Vec<LayoutListItem>>)
    )
)]
pub async fn list_layouts(
    State(state): State<LayoutsState>,
) -> Result<Json<ApiResponse<Vec<LayoutListItem>>>, ApiError> {
    let layouts = state.service.list_active().await?;
    let items = layouts.into_iter().map(LayoutListItem::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// Get a layout with all its plots
#[utoipa::path(
    get,
    path = "/api/v1/layouts/{id}",
    tag = "Layouts",
    params(("id" = String, Path, description = "Layout ID")),
    responses(
        (status = 200, description = "Layout with plots", body = ApiResponse<LayoutDetailResponse>),
        (status = 404, description = "Layout not found")
    )
)]
pub async fn get_layout(
    State(state): State<LayoutsState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LayoutDetailResponse>>, ApiError> {
    let (layout, plots) = state.service.get(&id).await?;
    Ok(Json(ApiResponse::success(LayoutDetailResponse {
        layout: layout.into(),
        plots: plots.into_iter().map(Into::into).collect(),
    })))
}

/// Create a layout (admin)
#[utoipa::path(
    post,
    path = "/api/v1/layouts",
    tag = "Layouts",
    security(("bearer_auth" = [])),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Layout created", body = ApiResponse<LayoutResponse>),
        (status = 400, description = "Missing name or image"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_layout(
    State(state): State<LayoutsState>,
    multipart: Multipart,
) -> Result<(axum::http::StatusCode, Json<ApiResponse<LayoutResponse>>), ApiError> {
    let (meta, image) = read_layout_form(multipart).await?;
    let layout = state.service.create(meta, image).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(ApiResponse::success(layout.into())),
    ))
}

/// Update a layout (admin)
#[utoipa::path(
    put,
    path = "/api/v1/layouts/{id}",
    tag = "Layouts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Layout ID")),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Layout updated", body = ApiResponse<LayoutResponse>),
        (status = 404, description = "Layout not found")
    )
)]
pub async fn update_layout(
    State(state): State<LayoutsState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<LayoutResponse>>, ApiError> {
    let (meta, image) = read_layout_form(multipart).await?;
    let layout = state.service.update(&id, meta, image).await?;
    Ok(Json(ApiResponse::success(layout.into())))
}

/// Deactivate a layout (admin, soft delete)
#[utoipa::path(
    delete,
    path = "/api/v1/layouts/{id}",
    tag = "Layouts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Layout ID")),
    responses(
        (status = 200, description = "Layout deactivated", body = ApiResponse<EmptyData>),
        (status = 404, description = "Layout not found")
    )
)]
pub async fn deactivate_layout(
    State(state): State<LayoutsState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state.service.deactivate(&id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

/// Pull layout metadata and the optional image out of a multipart form.
async fn read_layout_form(
    mut multipart: Multipart,
) -> Result<(LayoutMeta, Option<ImageUpload>), ApiError> {
    let mut meta = LayoutMeta::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let file_name = field.file_name().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| DomainError::Validation(format!("Failed to read image: {}", e)))?;
                image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    mime,
                    file_name,
                });
            }
            "name" | "location" | "description" | "isActive" | "is_active" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| DomainError::Validation(format!("Failed to read field: {}", e)))?;
                match name.as_str() {
                    "name" => meta.name = Some(value),
                    "location" => meta.location = Some(value),
                    "description" => meta.description = Some(value),
                    _ => {
                        meta.is_active = Some(value == "true" || value == "1");
                    }
                }
            }
            // Unknown fields are skipped, matching lenient form handling
            _ => {}
        }
    }

    Ok((meta, image))
}
