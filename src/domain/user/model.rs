//! User domain entity and actor roles

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// Coarse actor classification governing available actions.
///
/// Closed variant on purpose: every authorization check matches
/// exhaustively instead of comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }

    pub fn is_admin(&self) -> bool {
        match self {
            Self::Admin => true,
            Self::User => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub vehicle_type: Option<String>,
    pub role: Role,
    pub password_hash: String,
    pub is_active: bool,
    /// SHA-256 hex of an outstanding password-reset token, if any
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// The identity performing an operation, as re-derived from the verified
/// session token on every request. Never cached across requests.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl Actor {
    /// Authorization gate for admin-only operations.
    pub fn require_admin(&self) -> DomainResult<()> {
        match self.role {
            Role::Admin => Ok(()),
            Role::User => Err(DomainError::Forbidden(
                "Administrator role required".to_string(),
            )),
        }
    }

    /// Whether this actor may act on a resource owned by `owner_id`.
    pub fn can_act_on(&self, owner_id: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::User => self.user_id == owner_id,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role) -> Actor {
        Actor {
            user_id: "user-1".into(),
            email: "user@example.com".into(),
            role,
        }
    }

    #[test]
    fn role_string_roundtrip() {
        for role in &[Role::User, Role::Admin] {
            assert_eq!(&Role::from_str(role.as_str()), role);
        }
        // Unknown strings degrade to the least-privileged role.
        assert_eq!(Role::from_str("superuser"), Role::User);
    }

    #[test]
    fn admin_gate() {
        assert!(actor(Role::Admin).require_admin().is_ok());
        assert!(matches!(
            actor(Role::User).require_admin(),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn ownership_check_respects_role() {
        assert!(actor(Role::User).can_act_on("user-1"));
        assert!(!actor(Role::User).can_act_on("user-2"));
        assert!(actor(Role::Admin).can_act_on("user-2"));
    }
}
