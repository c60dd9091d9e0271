//! Tenant domain models and DTOs.
//!
//! A tenant is the unit of data partitioning: every user and note belongs to
//! exactly one, and every query a handler issues is filtered by it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{TenantId, UserId};
use crate::users::{User, UserRole};

/// Notes a FREE author may own before an upgrade is required.
pub const FREE_NOTE_LIMIT: i64 = 3;

/// Subscription tier. Stored on both tenants and users; the note quota is
/// decided by the author's own plan.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "tenant_plan", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Plan {
    #[default]
    Free,
    Pro,
}

impl Plan {
    /// Maximum authored notes for this plan, `None` when unlimited.
    pub const fn note_limit(self) -> Option<i64> {
        match self {
            Plan::Free => Some(FREE_NOTE_LIMIT),
            Plan::Pro => None,
        }
    }

    /// Whether an author already holding `existing` notes may create another.
    pub fn allows_another_note(self, existing: i64) -> bool {
        self.note_limit().is_none_or(|limit| existing < limit)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Plan::Free => "FREE",
            Plan::Pro => "PRO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub slug: String,
    pub plan: Plan,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TenantCounts {
    pub users: i64,
    pub notes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantSummary {
    pub id: TenantId,
    pub slug: String,
    pub name: String,
    pub plan: Plan,
    pub counts: TenantCounts,
}

/// `GET /tenants/{slug}` body. `members` is only present for admins.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantDetailResponse {
    pub tenant: TenantSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<User>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteUserDto {
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,
    /// Defaults to MEMBER.
    pub role: Option<UserRole>,
    /// A temporary password is generated when omitted.
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteResponse {
    pub message: String,
    pub user: User,
    /// Only present when the server generated the password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantPlanInfo {
    pub slug: String,
    pub plan: Plan,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpgradeResponse {
    pub message: String,
    pub tenant: TenantPlanInfo,
    pub user: User,
}

/// Target of an upgrade, by id or by email.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeUserDto {
    pub user_id: Option<UserId>,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpgradeUserResponse {
    pub message: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_plan_allows_up_to_limit() {
        assert!(Plan::Free.allows_another_note(0));
        assert!(Plan::Free.allows_another_note(2));
        assert!(!Plan::Free.allows_another_note(3));
        assert!(!Plan::Free.allows_another_note(10));
    }

    #[test]
    fn test_pro_plan_is_unlimited() {
        assert_eq!(Plan::Pro.note_limit(), None);
        assert!(Plan::Pro.allows_another_note(1_000));
    }

    #[test]
    fn test_plan_wire_format() {
        assert_eq!(serde_json::to_string(&Plan::Free).unwrap(), "\"FREE\"");
        assert_eq!(
            serde_json::from_str::<Plan>("\"PRO\"").unwrap(),
            Plan::Pro
        );
        assert_eq!(Plan::Pro.as_str(), "PRO");
    }

    #[test]
    fn test_members_omitted_when_absent() {
        let response = TenantDetailResponse {
            tenant: TenantSummary {
                id: TenantId::new(),
                slug: "acme".to_string(),
                name: "Acme".to_string(),
                plan: Plan::Free,
                counts: TenantCounts { users: 2, notes: 0 },
            },
            members: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("members").is_none());
        assert_eq!(json["tenant"]["counts"]["users"], 2);
    }

    #[test]
    fn test_upgrade_user_dto_accepts_camel_case() {
        let id = UserId::new();
        let dto: UpgradeUserDto =
            serde_json::from_value(serde_json::json!({ "userId": id.to_string() })).unwrap();
        assert_eq!(dto.user_id, Some(id));
        assert!(dto.email.is_none());
    }

    #[test]
    fn test_invite_rejects_overlong_email() {
        let dto = InviteUserDto {
            email: format!("{}@acme.test", "a".repeat(250)),
            name: None,
            role: None,
            password: None,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let dto = InviteUserDto {
            email: "new@acme.test".to_string(),
            ..dto
        };
        assert!(dto.validate().is_ok());
    }
}
