//! User domain models.
//!
//! [`User`] is the public projection returned by every endpoint; it has no
//! password field, so a hash can never be serialized by accident. The digest is
//! only ever loaded through [`UserCredentials`] during sign-in.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::ids::{TenantId, UserId};
use crate::tenants::Plan;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    #[default]
    Member,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Member => "MEMBER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "MEMBER" => Ok(UserRole::Member),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    pub plan: Plan,
    pub tenant_id: TenantId,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Columns selected for [`User`], shared by every query that returns one.
pub const USER_COLUMNS: &str =
    "id, email, name, role, plan, tenant_id, created_at, updated_at";

/// Sign-in lookup row. Never serialized.
#[derive(FromRow, Debug, Clone)]
pub struct UserCredentials {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub tenant_id: TenantId,
}
