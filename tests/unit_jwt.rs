use notely::notely_auth::{TokenPayload, sign_token, sign_token_with_ttl, verify_token};
use notely::notely_config::JwtConfig;
use notely::notely_models::{TenantId, UserId, UserRole};

fn config() -> JwtConfig {
    JwtConfig {
        secret: "unit-test-secret-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
    }
}

fn payload() -> TokenPayload {
    TokenPayload {
        id: UserId::new(),
        email: "member@acme.test".to_string(),
        role: UserRole::Member,
        tenant_id: TenantId::new(),
    }
}

#[test]
fn test_sign_and_verify() {
    let payload = payload();
    let token = sign_token(&payload, &config()).unwrap();

    assert_eq!(token.split('.').count(), 3);

    let claims = verify_token(&token, &config()).unwrap();
    assert_eq!(claims.payload, payload);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_configured_expiry_is_used() {
    let config = JwtConfig {
        access_token_expiry: 120,
        ..config()
    };
    let token = sign_token(&payload(), &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();
    assert_eq!(claims.exp - claims.iat, 120);
}

#[test]
fn test_expired_token_is_forbidden() {
    let token = sign_token_with_ttl(&payload(), -1, &config()).unwrap();
    let err = verify_token(&token, &config()).unwrap_err();
    assert_eq!(err.status.as_u16(), 403);
}

#[test]
fn test_foreign_secret_is_forbidden() {
    let token = sign_token(&payload(), &config()).unwrap();
    let other = JwtConfig {
        secret: "another-secret-that-is-also-32-characters".to_string(),
        ..config()
    };
    let err = verify_token(&token, &other).unwrap_err();
    assert_eq!(err.status.as_u16(), 403);
}

#[test]
fn test_malformed_token_is_forbidden() {
    for token in ["", "abc", "a.b.c"] {
        let err = verify_token(token, &config()).unwrap_err();
        assert_eq!(err.status.as_u16(), 403, "token: {token:?}");
    }
}
