//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{ApprovalService, BookingService};
use crate::auth::JwtConfig;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::http_metrics_middleware;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{
    auth, bookings, health, metrics, registrations, stations,
};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        auth::update_profile,
        auth::change_password,
        auth::request_password_reset,
        // Stations
        stations::list_stations,
        stations::get_station,
        stations::create_station,
        stations::update_station,
        stations::set_station_active,
        stations::delete_station,
        stations::set_slot_status,
        // Registrations
        registrations::submit_registration,
        registrations::list_pending_registrations,
        registrations::list_all_registrations,
        registrations::get_registration,
        registrations::approve_registration,
        registrations::reject_registration,
        // Bookings
        bookings::create_booking,
        bookings::list_own_bookings,
        bookings::list_all_bookings,
        bookings::get_booking,
        bookings::cancel_booking,
        bookings::complete_booking,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserInfo,
            auth::UpdateProfileRequest,
            auth::ChangePasswordRequest,
            auth::PasswordResetRequest,
            // Stations
            stations::StationDto,
            stations::SlotDto,
            stations::CreateStationRequest,
            stations::UpdateStationRequest,
            stations::SetActiveRequest,
            stations::SetSlotStatusRequest,
            // Registrations
            registrations::RegistrationDto,
            registrations::SubmitRegistrationRequest,
            registrations::RejectRequest,
            // Bookings
            bookings::BookingDto,
            bookings::CreateBookingRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User authentication: login (JWT), registration, profile and password management"),
        (name = "Stations", description = "Charging station discovery and admin management"),
        (name = "Registrations", description = "Station registration requests and the admin review workflow"),
        (name = "Bookings", description = "Charging slot booking: commit, cancel, complete"),
    ),
    info(
        title = "ChargeBunk API",
        version = "1.0.0",
        description = "REST API for EV charging station discovery, registration and booking",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    metrics_handle: PrometheusHandle,
    started_at: Arc<Instant>,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let booking_service = Arc::new(BookingService::new(repos.clone()));
    let approval_service = Arc::new(ApprovalService::new(repos.clone()));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_state = auth::AuthHandlerState {
        repos: repos.clone(),
        jwt_config,
    };

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route(
            "/password-reset-request",
            post(auth::request_password_reset),
        )
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/profile", put(auth::update_profile))
        .route("/change-password", put(auth::change_password))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    let station_state = stations::StationHandlerState {
        repos: repos.clone(),
    };

    // Station routes (public discovery)
    let station_routes = Router::new()
        .route("/", get(stations::list_stations))
        .route("/{id}", get(stations::get_station))
        .with_state(station_state.clone());

    // Station routes (admin, protected)
    let station_admin_routes = Router::new()
        .route("/", post(stations::create_station))
        .route(
            "/{id}",
            put(stations::update_station).delete(stations::delete_station),
        )
        .route("/{id}/active", put(stations::set_station_active))
        .route("/{id}/slots/{number}/status", put(stations::set_slot_status))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(station_state);

    // Registration routes (protected; admin checks live in the service)
    let registration_state = registrations::RegistrationHandlerState {
        service: approval_service,
    };
    let registration_routes = Router::new()
        .route(
            "/",
            get(registrations::list_all_registrations).post(registrations::submit_registration),
        )
        .route("/pending", get(registrations::list_pending_registrations))
        .route("/{id}", get(registrations::get_registration))
        .route("/{id}/approve", post(registrations::approve_registration))
        .route("/{id}/reject", post(registrations::reject_registration))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(registration_state);

    // Booking routes (protected)
    let booking_state = bookings::BookingHandlerState {
        service: booking_service,
    };
    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::list_own_bookings).post(bookings::create_booking),
        )
        .route("/all", get(bookings::list_all_bookings))
        .route("/{id}", get(bookings::get_booking))
        .route("/{id}/cancel", post(bookings::cancel_booking))
        .route("/{id}/complete", post(bookings::complete_booking))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(booking_state);

    let health_state = health::HealthState { db, started_at };
    let metrics_state = metrics::MetricsState {
        handle: metrics_handle,
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics
        .route(
            "/health",
            get(health::health_check).with_state(health_state),
        )
        .route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics_state),
        )
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Stations
        .nest("/api/v1/stations", station_routes)
        .nest("/api/v1/stations", station_admin_routes)
        // Registrations
        .nest("/api/v1/registrations", registration_routes)
        // Bookings
        .nest("/api/v1/bookings", booking_routes)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
