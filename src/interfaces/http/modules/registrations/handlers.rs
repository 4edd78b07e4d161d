//! Registration API handlers
//!
//! Submission is open to any authenticated user; the review queue and the
//! approve/reject decisions are admin operations.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use tracing::info;

use super::dto::{RegistrationDto, RejectRequest, SubmitRegistrationRequest};
use crate::application::ApprovalService;
use crate::domain::registration::{RegistrationRequest, RegistrationStatus, SlotTypes};
use crate::domain::station::OwnerContact;
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::{require_user, AuthenticatedUser};
use crate::interfaces::http::modules::stations::StationDto;

/// Registration state
#[derive(Clone)]
pub struct RegistrationHandlerState {
    pub service: Arc<ApprovalService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/registrations",
    tag = "Registrations",
    security(("bearer_auth" = [])),
    request_body = SubmitRegistrationRequest,
    responses(
        (status = 201, description = "Registration submitted for review", body = ApiResponse<RegistrationDto>),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn submit_registration(
    State(state): State<RegistrationHandlerState>,
    user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<SubmitRegistrationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegistrationDto>>), ApiError> {
    let actor = require_user(user)?;

    let registration = RegistrationRequest {
        id: uuid::Uuid::new_v4().to_string(),
        name: request.name,
        address: request.address,
        city: request.city,
        state: request.state,
        zip_code: request.zip_code,
        phone: request.phone,
        latitude: request.latitude,
        longitude: request.longitude,
        owner: OwnerContact {
            name: request.owner_name,
            email: request.owner_email,
            phone: request.owner_phone,
        },
        total_slots: request.total_slots,
        slot_types: SlotTypes::from_str(&request.slot_types),
        amenities: request.amenities,
        operating_hours: request.operating_hours,
        pricing: request.pricing,
        status: RegistrationStatus::Pending,
        submitted_at: Utc::now(),
        reviewed_by: None,
        reviewed_at: None,
        rejection_reason: None,
        station_id: None,
    };

    let saved = state.service.submit(&actor, registration).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RegistrationDto::from(saved))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/registrations/pending",
    tag = "Registrations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Review queue, oldest first", body = ApiResponse<Vec<RegistrationDto>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_pending_registrations(
    State(state): State<RegistrationHandlerState>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<Vec<RegistrationDto>>>, ApiError> {
    let actor = require_user(user)?;

    let pending = state.service.list_pending(&actor).await?;
    let dtos: Vec<RegistrationDto> = pending.into_iter().map(RegistrationDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/registrations",
    tag = "Registrations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every registration regardless of status", body = ApiResponse<Vec<RegistrationDto>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_all_registrations(
    State(state): State<RegistrationHandlerState>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<Vec<RegistrationDto>>>, ApiError> {
    let actor = require_user(user)?;

    let all = state.service.list_all(&actor).await?;
    let dtos: Vec<RegistrationDto> = all.into_iter().map(RegistrationDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/registrations/{id}",
    tag = "Registrations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration details", body = ApiResponse<RegistrationDto>),
        (status = 403, description = "Registration belongs to another owner"),
        (status = 404, description = "Registration not found")
    )
)]
pub async fn get_registration(
    State(state): State<RegistrationHandlerState>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<RegistrationDto>>, ApiError> {
    let actor = require_user(user)?;

    let registration = state.service.get(&actor, &id).await?;
    Ok(Json(ApiResponse::success(RegistrationDto::from(
        registration,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/registrations/{id}/approve",
    tag = "Registrations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration approved, station created", body = ApiResponse<StationDto>),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Registration not found"),
        (status = 409, description = "Registration already decided")
    )
)]
pub async fn approve_registration(
    State(state): State<RegistrationHandlerState>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<StationDto>>, ApiError> {
    let actor = require_user(user)?;

    let station = state.service.approve(&actor, &id).await?;
    info!(registration_id = %id, station_id = %station.id, "Approval handled");

    Ok(Json(ApiResponse::success(StationDto::from_station(
        &station,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/registrations/{id}/reject",
    tag = "Registrations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Registration ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Registration rejected"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Registration not found"),
        (status = 409, description = "Registration already decided")
    )
)]
pub async fn reject_registration(
    State(state): State<RegistrationHandlerState>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<RejectRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    let actor = require_user(user)?;

    state.service.reject(&actor, &id, &request.reason).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
