//! Role-based authorization for Axum handlers.
//!
//! Two ways to guard a handler:
//! 1. Extractor-based, with [`RequireRole`] (or the [`RequireAdmin`] alias)
//! 2. Manual, calling [`check_role`] inside the handler

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use notely_core::AppError;
use notely_models::UserRole;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Marker types naming the role a [`RequireRole`] extractor demands.
pub trait RoleRequirement: Send + Sync + 'static {
    const ROLE: UserRole;
}

#[derive(Debug, Clone, Copy)]
pub struct AdminOnly;

impl RoleRequirement for AdminOnly {
    const ROLE: UserRole = UserRole::Admin;
}

/// Authenticates the caller, then rejects with 403 unless their role is `R::ROLE`.
///
/// # Example
///
/// ```rust,ignore
/// use crate::middleware::role::RequireAdmin;
///
/// pub async fn invite_user(admin: RequireAdmin) -> Result<Json<Response>, AppError> {
///     let auth_user = admin.into_inner();
///     // Only admins reach this point
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireRole<R: RoleRequirement> {
    user: AuthUser,
    _role: PhantomData<R>,
}

impl<R: RoleRequirement> RequireRole<R> {
    pub fn user(&self) -> &AuthUser {
        &self.user
    }

    pub fn into_inner(self) -> AuthUser {
        self.user
    }
}

pub type RequireAdmin = RequireRole<AdminOnly>;

impl<R: RoleRequirement> FromRequestParts<AppState> for RequireRole<R> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        check_role(&user, R::ROLE)?;

        Ok(Self {
            user,
            _role: PhantomData,
        })
    }
}

/// Checks the caller's role from handler code.
///
/// # Example
///
/// ```rust,ignore
/// use crate::middleware::role::check_role;
/// use notely_models::UserRole;
///
/// pub async fn handler(auth_user: AuthUser) -> Result<Json<Response>, AppError> {
///     check_role(&auth_user, UserRole::Admin)?;
///     // Handler logic
/// }
/// ```
pub fn check_role(auth_user: &AuthUser, required_role: UserRole) -> Result<(), AppError> {
    let user_role = auth_user.role();

    if user_role != required_role {
        tracing::warn!(
            user.id = %auth_user.user_id(),
            user.email = %auth_user.email(),
            user.role = %user_role,
            required_role = %required_role,
            "Role check failed"
        );
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {}",
            required_role
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use notely_auth::{Claims, TokenPayload};
    use notely_models::{TenantId, UserId};

    fn auth_user(role: UserRole) -> AuthUser {
        AuthUser(Claims {
            payload: TokenPayload {
                id: UserId::new(),
                email: "test@example.com".to_string(),
                role,
                tenant_id: TenantId::new(),
            },
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_check_role_matches() {
        assert!(check_role(&auth_user(UserRole::Admin), UserRole::Admin).is_ok());
        assert!(check_role(&auth_user(UserRole::Member), UserRole::Member).is_ok());
    }

    #[test]
    fn test_check_role_mismatch_is_forbidden() {
        let err = check_role(&auth_user(UserRole::Member), UserRole::Admin).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let err = check_role(&auth_user(UserRole::Admin), UserRole::Member).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_admin_requirement() {
        assert_eq!(AdminOnly::ROLE, UserRole::Admin);
    }
}
