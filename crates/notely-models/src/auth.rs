//! Authentication request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::tenants::Tenant;
use crate::users::User;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: String,
    /// Tenant name; the slug is derived from it. Falls back to the email domain.
    #[validate(length(min = 1, max = 100, message = "tenant must be 1-100 characters"))]
    pub tenant: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    pub user: User,
    pub tenant: Tenant,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SigninRequest {
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SigninResponse {
    pub message: String,
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
