//! Authentication middleware for Axum
//!
//! Every protected route re-derives the acting identity from the verified
//! bearer token on each request; nothing about authority is cached.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;

use crate::auth::jwt::{verify_token, Claims, JwtConfig};
use crate::domain::user::{Actor, Role};
use crate::domain::DomainError;
use crate::interfaces::http::common::ApiError;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

/// Authentication state for the middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated user information derived from a verified JWT
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: Role::from_str(&claims.role),
        }
    }

    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Resolve the acting identity in a handler, or fail with 401.
///
/// Handlers on protected routes take `Option<Extension<AuthenticatedUser>>`
/// and call this first.
pub fn require_user(user: Option<Extension<AuthenticatedUser>>) -> Result<Actor, ApiError> {
    user.map(|Extension(u)| u.actor()).ok_or(ApiError(
        DomainError::Unauthorized("Not authenticated".to_string()),
    ))
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let user = AuthenticatedUser::from_claims(claims);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let message = match error {
        AuthError::MissingToken => "Missing authentication token",
        AuthError::InvalidToken => "Invalid authentication token",
        AuthError::ExpiredToken => "Token has expired",
    };

    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (StatusCode::UNAUTHORIZED, body).into_response()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_token;

    #[test]
    fn claims_produce_typed_role() {
        let config = JwtConfig::default();
        let token = create_token("user-1", "a@example.com", "admin", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        let user = AuthenticatedUser::from_claims(claims);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.actor().user_id, "user-1");
    }

    #[test]
    fn unknown_role_degrades_to_user() {
        let config = JwtConfig::default();
        let token = create_token("user-1", "a@example.com", "owner", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(AuthenticatedUser::from_claims(claims).role, Role::User);
    }

    #[test]
    fn missing_extension_is_unauthorized() {
        let err = require_user(None).unwrap_err();
        assert!(matches!(err.0, DomainError::Unauthorized(_)));
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_token("Basic abc"), None);
    }
}
