//! JWT claim structures.

use notely_models::{TenantId, UserId, UserRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
    pub tenant_id: TenantId,
}

/// Signed token contents: the payload plus issue and expiry timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub payload: TokenPayload,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> TokenPayload {
        TokenPayload {
            id: UserId::new(),
            email: "admin@acme.test".to_string(),
            role: UserRole::Admin,
            tenant_id: TenantId::new(),
        }
    }

    #[test]
    fn test_claims_serialize_flat() {
        let payload = sample_payload();
        let claims = Claims {
            payload: payload.clone(),
            exp: 1234567890,
            iat: 1234567800,
        };
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["id"], payload.id.to_string());
        assert_eq!(json["email"], "admin@acme.test");
        assert_eq!(json["role"], "ADMIN");
        assert_eq!(json["tenantId"], payload.tenant_id.to_string());
        assert_eq!(json["exp"], 1234567890);
        assert!(json.get("payload").is_none());
    }

    #[test]
    fn test_claims_deserialize() {
        let payload = sample_payload();
        let json = format!(
            r#"{{"id":"{}","email":"admin@acme.test","role":"ADMIN","tenantId":"{}","exp":9999999999,"iat":9999999900}}"#,
            payload.id, payload.tenant_id
        );
        let claims: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims.payload, payload);
        assert_eq!(claims.exp, 9999999999);
    }
}
