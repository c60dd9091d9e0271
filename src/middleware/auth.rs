use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use notely_auth::{Claims, verify_token};
use notely_core::AppError;
use notely_models::{TenantId, UserId, UserRole};

use crate::state::AppState;

/// Caller identity taken from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

/// The pair every tenant-owned query filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope {
    pub tenant_id: TenantId,
    pub user_id: UserId,
}

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.0.payload.id
    }

    pub fn tenant_id(&self) -> TenantId {
        self.0.payload.tenant_id
    }

    pub fn role(&self) -> UserRole {
        self.0.payload.role
    }

    pub fn email(&self) -> &str {
        &self.0.payload.email
    }

    pub fn is_admin(&self) -> bool {
        self.role() == UserRole::Admin
    }

    pub fn scope(&self) -> TenantScope {
        TenantScope {
            tenant_id: self.tenant_id(),
            user_id: self.user_id(),
        }
    }
}

/// Extracts the token from an `Authorization` header value.
///
/// The value must be exactly two space-separated parts with the scheme
/// `Bearer`. Anything else is a 401 and the token is never looked at.
pub fn parse_bearer(header_value: &str) -> Result<&str, AppError> {
    let mut parts = header_value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AppError::unauthorized(
            "Invalid authorization header format".to_string(),
        )),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?
            .to_str()
            .map_err(|_| {
                AppError::unauthorized("Invalid authorization header format".to_string())
            })?;

        let token = parse_bearer(auth_header)?;
        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use notely_auth::TokenPayload;

    fn create_test_claims(role: UserRole) -> Claims {
        Claims {
            payload: TokenPayload {
                id: UserId::new(),
                email: "test@example.com".to_string(),
                role,
                tenant_id: TenantId::new(),
            },
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_parse_bearer_accepts_two_parts() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_parse_bearer_rejects_malformed() {
        for value in [
            "Bearer",
            "Bearer ",
            "Basic abc",
            "bearer abc",
            "Bearer a b",
            "abc",
            "",
        ] {
            let err = parse_bearer(value).unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED, "value: {value:?}");
        }
    }

    #[test]
    fn test_accessors() {
        let claims = create_test_claims(UserRole::Admin);
        let expected_user = claims.payload.id;
        let expected_tenant = claims.payload.tenant_id;
        let auth_user = AuthUser(claims);

        assert_eq!(auth_user.user_id(), expected_user);
        assert_eq!(auth_user.tenant_id(), expected_tenant);
        assert_eq!(auth_user.email(), "test@example.com");
        assert!(auth_user.is_admin());
        assert_eq!(
            auth_user.scope(),
            TenantScope {
                tenant_id: expected_tenant,
                user_id: expected_user,
            }
        );
    }

    #[test]
    fn test_member_is_not_admin() {
        let auth_user = AuthUser(create_test_claims(UserRole::Member));
        assert!(!auth_user.is_admin());
        assert_eq!(auth_user.role(), UserRole::Member);
    }
}
