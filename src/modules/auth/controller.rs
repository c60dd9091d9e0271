use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use notely_core::AppError;
use notely_models::{MeResponse, SigninRequest, SigninResponse, SignupRequest, SignupResponse};

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable code, e.g. `PLAN_LIMIT_REACHED`
    pub code: Option<String>,
}

/// Create a tenant and its first admin
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Tenant and admin user created", body = SignupResponse),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse),
        (status = 403, description = "Tenant already exists (TENANT_EXISTS)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let (user, tenant) = AuthService::signup(&state.db, dto, &state.password_config).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Signup successful".to_string(),
            user,
            tenant,
        }),
    ))
}

/// Sign in and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = SigninResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Wrong password (INVALID_CREDENTIALS)", body = ErrorResponse),
        (status = 404, description = "Unknown email (USER_NOT_FOUND)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SigninRequest>,
) -> Result<Json<SigninResponse>, AppError> {
    let (token, user) = AuthService::signin(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(SigninResponse {
        message: "Signin successful".to_string(),
        token,
        user,
    }))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Caller profile", body = MeResponse),
        (status = 401, description = "Missing or malformed authorization header", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let user = AuthService::find_user(&state.db, auth_user.scope()).await?;
    Ok(Json(MeResponse { user }))
}
