//! Station API handlers
//!
//! The listing endpoint is the public discovery view; everything mutating
//! is an admin operation.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use tracing::info;

use super::dto::{
    CreateStationRequest, SetActiveRequest, SetSlotStatusRequest, StationDto, StationQuery,
    UpdateStationRequest,
};
use crate::application::discovery::{filter_and_sort, SortKey, StationFilter};
use crate::domain::geo::Coordinate;
use crate::domain::registration::{generate_slots, SlotTypes};
use crate::domain::station::{ChargerType, OwnerContact, SlotStatus, Station};
use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::{require_user, AuthenticatedUser};

/// Station state
#[derive(Clone)]
pub struct StationHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

fn parse_charger_type(s: &str) -> Result<ChargerType, ApiError> {
    match s {
        "standard" => Ok(ChargerType::Standard),
        "fast" => Ok(ChargerType::Fast),
        other => Err(ApiError(DomainError::Validation(format!(
            "Unknown charger type '{}'",
            other
        )))),
    }
}

fn parse_slot_status(s: &str) -> Result<SlotStatus, ApiError> {
    match s {
        "available" => Ok(SlotStatus::Available),
        "occupied" => Ok(SlotStatus::Occupied),
        other => Err(ApiError(DomainError::Validation(format!(
            "Unknown slot status '{}'",
            other
        )))),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/stations",
    tag = "Stations",
    params(StationQuery),
    responses(
        (status = 200, description = "Matching active stations", body = ApiResponse<Vec<StationDto>>)
    )
)]
pub async fn list_stations(
    State(state): State<StationHandlerState>,
    Query(query): Query<StationQuery>,
) -> Result<Json<ApiResponse<Vec<StationDto>>>, ApiError> {
    let charger_type = query
        .charger_type
        .as_deref()
        .map(parse_charger_type)
        .transpose()?;

    let filter = StationFilter {
        search: query.search,
        location: query.location,
        charger_type,
        available_now: query.available_now,
        fast_only: query.fast_only,
        open_24_7: query.open_24_7,
    };
    let sort = query
        .sort
        .as_deref()
        .map(SortKey::from_str)
        .unwrap_or_default();
    let origin = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
        _ => None,
    };

    let stations = state.repos.stations().find_active().await?;
    let views = filter_and_sort(stations, &filter, sort, origin);
    let dtos: Vec<StationDto> = views.iter().map(StationDto::from_view).collect();

    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station details", body = ApiResponse<StationDto>),
        (status = 404, description = "Station not found")
    )
)]
pub async fn get_station(
    State(state): State<StationHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StationDto>>, ApiError> {
    let station = state
        .repos
        .stations()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Station", "id", &id))?;

    Ok(Json(ApiResponse::success(StationDto::from_station(
        &station,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/stations",
    tag = "Stations",
    security(("bearer_auth" = [])),
    request_body = CreateStationRequest,
    responses(
        (status = 201, description = "Station created", body = ApiResponse<StationDto>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_station(
    State(state): State<StationHandlerState>,
    user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<CreateStationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StationDto>>), ApiError> {
    let actor = require_user(user)?;
    actor.require_admin()?;

    let slot_types = SlotTypes::from_str(&request.slot_types);
    let station = Station {
        id: uuid::Uuid::new_v4().to_string(),
        name: request.name,
        address: request.address,
        city: request.city,
        state: request.state,
        zip_code: request.zip_code,
        phone: request.phone,
        latitude: request.latitude,
        longitude: request.longitude,
        operating_hours: request.operating_hours,
        pricing: request.pricing,
        amenities: request.amenities,
        owner: OwnerContact {
            name: request.owner_name,
            email: request.owner_email,
            phone: request.owner_phone,
        },
        slots: generate_slots(request.total_slots, slot_types),
        is_active: true,
        created_at: Utc::now(),
    };

    state.repos.stations().save(station.clone()).await?;
    info!(station_id = %station.id, admin = %actor.user_id, "Station created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(StationDto::from_station(&station))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    request_body = UpdateStationRequest,
    responses(
        (status = 200, description = "Station updated", body = ApiResponse<StationDto>),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Station not found")
    )
)]
pub async fn update_station(
    State(state): State<StationHandlerState>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<UpdateStationRequest>,
) -> Result<Json<ApiResponse<StationDto>>, ApiError> {
    let actor = require_user(user)?;
    actor.require_admin()?;

    let existing = state
        .repos
        .stations()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Station", "id", &id))?;

    let updated = Station {
        name: request.name,
        address: request.address,
        city: request.city,
        state: request.state,
        zip_code: request.zip_code,
        phone: request.phone,
        latitude: request.latitude,
        longitude: request.longitude,
        operating_hours: request.operating_hours,
        pricing: request.pricing,
        amenities: request.amenities,
        owner: OwnerContact {
            name: request.owner_name,
            email: request.owner_email,
            phone: request.owner_phone,
        },
        ..existing
    };

    state.repos.stations().update(updated.clone()).await?;
    info!(station_id = %id, admin = %actor.user_id, "Station updated");

    Ok(Json(ApiResponse::success(StationDto::from_station(
        &updated,
    ))))
}

#[utoipa::path(
    put,
    path = "/api/v1/stations/{id}/active",
    tag = "Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Active flag updated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Station not found")
    )
)]
pub async fn set_station_active(
    State(state): State<StationHandlerState>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<SetActiveRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    let actor = require_user(user)?;
    actor.require_admin()?;

    state
        .repos
        .stations()
        .set_active(&id, request.is_active)
        .await?;
    info!(
        station_id = %id,
        is_active = request.is_active,
        admin = %actor.user_id,
        "Station active flag changed"
    );

    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    delete,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Station not found")
    )
)]
pub async fn delete_station(
    State(state): State<StationHandlerState>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    let actor = require_user(user)?;
    actor.require_admin()?;

    state.repos.stations().delete(&id).await?;
    info!(station_id = %id, admin = %actor.user_id, "Station deleted");

    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    put,
    path = "/api/v1/stations/{id}/slots/{number}/status",
    tag = "Stations",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Station ID"),
        ("number" = i32, Path, description = "Slot number (1-based)")
    ),
    request_body = SetSlotStatusRequest,
    responses(
        (status = 200, description = "Slot status set"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Station or slot not found")
    )
)]
pub async fn set_slot_status(
    State(state): State<StationHandlerState>,
    Path((id, number)): Path<(String, i32)>,
    user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<SetSlotStatusRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    let actor = require_user(user)?;
    actor.require_admin()?;

    let status = parse_slot_status(&request.status)?;
    state
        .repos
        .stations()
        .set_slot_status(&id, number, status)
        .await?;
    info!(
        station_id = %id,
        slot = number,
        status = %status,
        admin = %actor.user_id,
        "Slot status overridden"
    );

    Ok(Json(ApiResponse::success(EmptyData {})))
}
