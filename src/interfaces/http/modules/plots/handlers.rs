//! Plot handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::services::PlotService;
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData, ValidatedJson};

use super::dto::{
    BatchCreatePlotsRequest, CreatePlotRequest, PlotDetailResponse, PlotResponse,
    PlotSearchQuery, UpdatePlotRequest, UpdatePlotStatusRequest,
};

/// Plots handler state
#[derive(Clone)]
pub struct PlotsState {
    pub service: Arc<PlotService>,
}

/// Search plots by number
#[utoipa::path(
    get,
    path = "/api/v1/plots/search",
    tag = "Plots",
    params(PlotSearchQuery),
    responses(
        (status = 200, description = "Matching plots", body = ApiResponse<Vec<PlotResponse>>)
    )
)]
pub async fn search_plots(
    State(state): State<PlotsState>,
    Query(query): Query<PlotSearchQuery>,
) -> Result<Json<ApiResponse<Vec<PlotResponse>>>, ApiError> {
    let plots = state.service.search(query.into()).await?;
    Ok(Json(ApiResponse::success(
        plots.into_iter().map(Into::into).collect(),
    )))
}

/// Get a plot with its booking history
#[utoipa::path(
    get,
    path = "/api/v1/plots/{id}",
    tag = "Plots",
    params(("id" = String, Path, description = "Plot ID")),
    responses(
        (status = 200, description = "Plot with bookings", body = ApiResponse<PlotDetailResponse>),
        (status = 404, description = "Plot not found")
    )
)]
pub async fn get_plot(
    State(state): State<PlotsState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PlotDetailResponse>>, ApiError> {
    let (plot, bookings) = state.service.get(&id).await?;
    Ok(Json(ApiResponse::success(PlotDetailResponse {
        plot: plot.into(),
        bookings: bookings.into_iter().map(Into::into).collect(),
    })))
}

/// Create a plot under a layout (admin)
#[utoipa::path(
    post,
    path = "/api/v1/layouts/{id}/plots",
    tag = "Plots",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Layout ID")),
    request_body = CreatePlotRequest,
    responses(
        (status = 201, description = "Plot created", body = ApiResponse<PlotResponse>),
        (status = 400, description = "Invalid geometry or duplicate plot number"),
        (status = 404, description = "Layout not found")
    )
)]
pub async fn create_plot(
    State(state): State<PlotsState>,
    Path(layout_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CreatePlotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlotResponse>>), ApiError> {
    let plot = state.service.create(&layout_id, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(plot.into())),
    ))
}

/// Create a batch of plots atomically (admin)
#[utoipa::path(
    post,
    path = "/api/v1/layouts/{id}/plots/batch",
    tag = "Plots",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Layout ID")),
    request_body = BatchCreatePlotsRequest,
    responses(
        (status = 201, description = "All plots created", body = ApiResponse<Vec<PlotResponse>>),
        (status = 400, description = "Batch rejected; nothing was written"),
        (status = 404, description = "Layout not found")
    )
)]
pub async fn create_plots_batch(
    State(state): State<PlotsState>,
    Path(layout_id): Path<String>,
    ValidatedJson(body): ValidatedJson<BatchCreatePlotsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<PlotResponse>>>), ApiError> {
    let specs = body.plots.into_iter().map(Into::into).collect();
    let plots = state.service.create_batch(&layout_id, specs).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            plots.into_iter().map(Into::into).collect(),
        )),
    ))
}

/// Update plot geometry and sale attributes (admin)
#[utoipa::path(
    put,
    path = "/api/v1/plots/{id}",
    tag = "Plots",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Plot ID")),
    request_body = UpdatePlotRequest,
    responses(
        (status = 200, description = "Plot updated", body = ApiResponse<PlotResponse>),
        (status = 400, description = "Invalid geometry or duplicate plot number"),
        (status = 404, description = "Plot not found")
    )
)]
pub async fn update_plot(
    State(state): State<PlotsState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdatePlotRequest>,
) -> Result<Json<ApiResponse<PlotResponse>>, ApiError> {
    let plot = state.service.update(&id, body.into()).await?;
    Ok(Json(ApiResponse::success(plot.into())))
}

/// Toggle plot status between available and hold (admin)
///
/// Transitions entering or leaving `booked` are rejected; those go
/// through the booking endpoints.
#[utoipa::path(
    patch,
    path = "/api/v1/plots/{id}/status",
    tag = "Plots",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Plot ID")),
    request_body = UpdatePlotStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<PlotResponse>),
        (status = 400, description = "Transition not allowed"),
        (status = 404, description = "Plot not found")
    )
)]
pub async fn update_plot_status(
    State(state): State<PlotsState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdatePlotStatusRequest>,
) -> Result<Json<ApiResponse<PlotResponse>>, ApiError> {
    let plot = state.service.update_status(&id, body.status).await?;
    Ok(Json(ApiResponse::success(plot.into())))
}

/// Delete a plot (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/plots/{id}",
    tag = "Plots",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Plot ID")),
    responses(
        (status = 200, description = "Plot deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Plot not found"),
        (status = 409, description = "Plot has an active booking")
    )
)]
pub async fn delete_plot(
    State(state): State<PlotsState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state.service.delete(&id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
