//! Token signing and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! [`JwtConfig`]. Expiry is checked with zero leeway.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use notely_config::JwtConfig;
use notely_core::AppError;

use crate::claims::{Claims, TokenPayload};

/// Signs `payload` with the configured lifetime (one hour by default).
pub fn sign_token(payload: &TokenPayload, jwt_config: &JwtConfig) -> Result<String, AppError> {
    sign_token_with_ttl(payload, jwt_config.access_token_expiry, jwt_config)
}

/// Signs `payload` with an explicit lifetime in seconds.
pub fn sign_token_with_ttl(
    payload: &TokenPayload,
    ttl_seconds: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now.saturating_add(ttl_seconds).max(0);

    let claims = Claims {
        payload: payload.clone(),
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the claims.
///
/// # Errors
///
/// Returns a 403 error when the token is malformed, signed with another secret
/// or expired. A missing or malformed header is the caller's concern and maps
/// to 401 before this is reached.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::forbidden("Token is not valid".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notely_models::{TenantId, UserId, UserRole};

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn payload(role: UserRole) -> TokenPayload {
        TokenPayload {
            id: UserId::new(),
            email: "test@example.com".to_string(),
            role,
            tenant_id: TenantId::new(),
        }
    }

    #[test]
    fn test_round_trip_reproduces_payload() {
        let config = get_test_jwt_config();
        for role in [UserRole::Admin, UserRole::Member] {
            let payload = payload(role);
            let token = sign_token(&payload, &config).unwrap();
            let claims = verify_token(&token, &config).unwrap();
            assert_eq!(claims.payload, payload);
        }
    }

    #[test]
    fn test_expiry_is_one_hour() {
        let config = get_test_jwt_config();
        let token = sign_token(&payload(UserRole::Member), &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = get_test_jwt_config();
        let token = sign_token_with_ttl(&payload(UserRole::Member), -30, &config).unwrap();
        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = get_test_jwt_config();
        let token = sign_token(&payload(UserRole::Admin), &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            access_token_expiry: 3600,
        };
        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let config = get_test_jwt_config();
        assert!(verify_token("invalid-token", &config).is_err());
        assert!(verify_token("", &config).is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let config = get_test_jwt_config();
        let token = sign_token(&payload(UserRole::Member), &config).unwrap();

        let forged_payload = payload(UserRole::Admin);
        let forged = sign_token(&forged_payload, &config).unwrap();

        // header.payload from one token, signature from another
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        parts[1] = forged_parts[1];
        let spliced = parts.join(".");

        assert!(verify_token(&spliced, &config).is_err());
    }
}
