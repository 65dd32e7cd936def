//! Booking handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use crate::application::services::BookingService;
use crate::auth::AuthenticatedUser;
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};

use super::dto::{BookingResponse, CreateBookingRequest, UpdateBookingRequest};

/// Bookings handler state
#[derive(Clone)]
pub struct BookingsState {
    pub service: Arc<BookingService>,
}

/// Book a plot for a client (admin)
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingResponse>),
        (status = 400, description = "Plot is already booked"),
        (status = 404, description = "Plot not found")
    )
)]
pub async fn create_booking(
    State(state): State<BookingsState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), ApiError> {
    let booking = state
        .service
        .create(&body.plot_id, body.client_info(), Some(auth.user_id))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(booking.into())),
    ))
}

/// List all bookings, newest first (admin)
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All bookings", body = ApiResponse<Vec<BookingResponse>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingsState>,
) -> Result<Json<ApiResponse<Vec<BookingResponse>>>, ApiError> {
    let bookings = state.service.list().await?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(Into::into).collect(),
    )))
}

/// Get a booking (admin)
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking", body = ApiResponse<BookingResponse>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingsState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking = state.service.get(&id).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

/// Update client and payment details (admin)
#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingResponse>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking(
    State(state): State<BookingsState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking = state.service.update(&id, body.into()).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

/// Cancel a booking and release its plot (admin)
#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingResponse>),
        (status = 400, description = "Booking is already cancelled"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingsState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking = state.service.cancel(&id).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}
