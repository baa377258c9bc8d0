use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,       // Admin ID
    pub email: String,
    pub role: AdminRole,
    pub exp: usize,        // Expiration time
    pub iat: usize,        // Issued at
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Moderator,
}

/// Permissions checked before a handler does any work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Read, change or exercise global configuration
    Administer,
}

impl AdminRole {
    pub fn has_permission(&self, permission: Permission) -> bool {
        match permission {
            Permission::Administer => matches!(self, AdminRole::SuperAdmin | AdminRole::Admin),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Admin => "admin",
            AdminRole::Moderator => "moderator",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: String,
    pub email: String,
    pub role: AdminRole,
}

/// Permission check applied to an authenticated admin
pub trait Authorizer: Send + Sync {
    fn check(&self, admin: &CurrentAdmin, permission: Permission) -> Result<()>;
}

/// Grants permissions from the role carried in the token
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAuthorizer;

impl Authorizer for RoleAuthorizer {
    fn check(&self, admin: &CurrentAdmin, permission: Permission) -> Result<()> {
        if admin.role.has_permission(permission) {
            Ok(())
        } else {
            tracing::warn!(
                admin_id = %admin.id,
                role = admin.role.as_str(),
                ?permission,
                "Permission denied"
            );
            Err(AppError::Forbidden)
        }
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.config.jwt.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {}", e);
        AppError::Unauthorized
    })?
    .claims;

    let current_admin = CurrentAdmin {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
    };

    request.extensions_mut().insert(current_admin);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(role: AdminRole) -> CurrentAdmin {
        CurrentAdmin {
            id: "a1".to_string(),
            email: "ops@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_administer_permission() {
        assert!(AdminRole::SuperAdmin.has_permission(Permission::Administer));
        assert!(AdminRole::Admin.has_permission(Permission::Administer));
        assert!(!AdminRole::Moderator.has_permission(Permission::Administer));
    }

    #[test]
    fn test_role_authorizer() {
        let authorizer = RoleAuthorizer;
        assert!(authorizer
            .check(&admin(AdminRole::Admin), Permission::Administer)
            .is_ok());
        assert!(matches!(
            authorizer.check(&admin(AdminRole::Moderator), Permission::Administer),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(
            serde_json::to_string(&AdminRole::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
        let role: AdminRole = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(role, AdminRole::Moderator);
    }
}
