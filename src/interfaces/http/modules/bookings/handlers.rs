//! Booking API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{BookingDto, CreateBookingRequest};
use crate::application::BookingService;
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::{require_user, AuthenticatedUser};

/// Booking state
#[derive(Clone)]
pub struct BookingHandlerState {
    pub service: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking committed", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid booking request"),
        (status = 404, description = "Station or slot not found"),
        (status = 409, description = "Slot is no longer available")
    )
)]
pub async fn create_booking(
    State(state): State<BookingHandlerState>,
    user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let actor = require_user(user)?;

    let booking = state
        .service
        .book(
            &actor,
            &request.station_id,
            request.slot_number,
            request.booking_time,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from(booking))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's bookings, newest first", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_own_bookings(
    State(state): State<BookingHandlerState>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let actor = require_user(user)?;

    let bookings = state.service.list_own(&actor).await?;
    let dtos: Vec<BookingDto> = bookings.into_iter().map(BookingDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/all",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every booking in the ledger", body = ApiResponse<Vec<BookingDto>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_all_bookings(
    State(state): State<BookingHandlerState>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let actor = require_user(user)?;

    let bookings = state.service.list_all(&actor).await?;
    let dtos: Vec<BookingDto> = bookings.into_iter().map(BookingDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingHandlerState>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let actor = require_user(user)?;

    let booking = state.service.get(&actor, &id).await?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled, slot released", body = ApiResponse<BookingDto>),
        (status = 403, description = "Booking belongs to another user"),
        (status = 409, description = "Booking is no longer active")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingHandlerState>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let actor = require_user(user)?;

    let booking = state.service.cancel(&actor, &id).await?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/complete",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking completed, slot released", body = ApiResponse<BookingDto>),
        (status = 403, description = "Booking belongs to another user"),
        (status = 409, description = "Booking is no longer active")
    )
)]
pub async fn complete_booking(
    State(state): State<BookingHandlerState>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let actor = require_user(user)?;

    let booking = state.service.complete(&actor, &id).await?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}
