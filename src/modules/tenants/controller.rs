use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use notely_core::AppError;
use notely_models::{
    InviteResponse, InviteUserDto, TenantDetailResponse, TenantPlanInfo, UpgradeResponse,
    UpgradeUserDto, UpgradeUserResponse,
};

use super::service::TenantService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Tenant summary, with the member list for admins
#[utoipa::path(
    get,
    path = "/tenants/{slug}",
    params(
        ("slug" = String, Path, description = "Tenant slug")
    ),
    responses(
        (status = 200, description = "Tenant summary", body = TenantDetailResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the caller's tenant", body = ErrorResponse)
    ),
    tag = "Tenants",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn get_tenant(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(slug): Path<String>,
) -> Result<Json<TenantDetailResponse>, AppError> {
    let tenant = TenantService::resolve_own_tenant(&state.db, auth_user.tenant_id(), &slug).await?;
    let detail = TenantService::tenant_detail(&state.db, tenant, auth_user.is_admin()).await?;
    Ok(Json(detail))
}

/// Create a user in the caller's tenant
#[utoipa::path(
    post,
    path = "/tenants/{slug}/invite",
    params(
        ("slug" = String, Path, description = "Tenant slug")
    ),
    request_body = InviteUserDto,
    responses(
        (status = 201, description = "User invited", body = InviteResponse),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an admin, or not the caller's tenant", body = ErrorResponse)
    ),
    tag = "Tenants",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(user.id = %admin.user().user_id()))]
pub async fn invite_user(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(slug): Path<String>,
    ValidatedJson(dto): ValidatedJson<InviteUserDto>,
) -> Result<(StatusCode, Json<InviteResponse>), AppError> {
    let auth_user = admin.into_inner();
    let tenant = TenantService::resolve_own_tenant(&state.db, auth_user.tenant_id(), &slug).await?;

    let (user, temporary_password) =
        TenantService::invite_user(&state.db, tenant.id, dto, &state.password_config).await?;

    Ok((
        StatusCode::CREATED,
        Json(InviteResponse {
            message: "User invited".to_string(),
            user,
            temporary_password,
        }),
    ))
}

/// Upgrade the tenant and the calling admin to PRO
#[utoipa::path(
    post,
    path = "/tenants/{slug}/upgrade",
    params(
        ("slug" = String, Path, description = "Tenant slug")
    ),
    responses(
        (status = 200, description = "Upgraded", body = UpgradeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an admin, or not the caller's tenant", body = ErrorResponse)
    ),
    tag = "Tenants",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin), fields(user.id = %admin.user().user_id()))]
pub async fn upgrade_tenant(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(slug): Path<String>,
) -> Result<Json<UpgradeResponse>, AppError> {
    let auth_user = admin.into_inner();
    let tenant = TenantService::resolve_own_tenant(&state.db, auth_user.tenant_id(), &slug).await?;

    let (tenant, user) =
        TenantService::upgrade_tenant(&state.db, tenant.id, auth_user.user_id()).await?;

    Ok(Json(UpgradeResponse {
        message: "Upgraded to PRO".to_string(),
        tenant: TenantPlanInfo {
            slug: tenant.slug,
            plan: tenant.plan,
        },
        user,
    }))
}

/// Upgrade another user of the caller's tenant to PRO
#[utoipa::path(
    post,
    path = "/tenants/{slug}/upgrade-user",
    params(
        ("slug" = String, Path, description = "Tenant slug")
    ),
    request_body = UpgradeUserDto,
    responses(
        (status = 200, description = "User upgraded", body = UpgradeUserResponse),
        (status = 400, description = "Neither userId nor email given", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not an admin, or not the caller's tenant", body = ErrorResponse),
        (status = 404, description = "User not found in this tenant", body = ErrorResponse)
    ),
    tag = "Tenants",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, admin, dto), fields(user.id = %admin.user().user_id()))]
pub async fn upgrade_user(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(slug): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpgradeUserDto>,
) -> Result<Json<UpgradeUserResponse>, AppError> {
    let auth_user = admin.into_inner();
    let tenant = TenantService::resolve_own_tenant(&state.db, auth_user.tenant_id(), &slug).await?;

    let user = TenantService::upgrade_user(&state.db, tenant.id, dto).await?;

    Ok(Json(UpgradeUserResponse {
        message: "User upgraded to PRO".to_string(),
        user,
    }))
}
