use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use notely_auth::TokenPayload;
use notely_models::{
    CreateNoteDto, InviteResponse, InviteUserDto, MeResponse, MessageResponse, Note,
    NoteMutationResponse, NoteResponse, NotesResponse, Plan, SigninRequest, SigninResponse,
    SignupRequest, SignupResponse, Tenant, TenantCounts, TenantDetailResponse, TenantPlanInfo,
    TenantSummary, UpdateNoteDto, UpgradeResponse, UpgradeUserDto, UpgradeUserResponse, User,
    UserRole,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::signin,
        crate::modules::auth::controller::me,
        crate::modules::notes::controller::create_note,
        crate::modules::notes::controller::list_notes,
        crate::modules::notes::controller::get_note,
        crate::modules::notes::controller::update_note,
        crate::modules::notes::controller::delete_note,
        crate::modules::tenants::controller::get_tenant,
        crate::modules::tenants::controller::invite_user,
        crate::modules::tenants::controller::upgrade_tenant,
        crate::modules::tenants::controller::upgrade_user,
        crate::modules::health::controller::health_check,
    ),
    components(
        schemas(
            User,
            UserRole,
            Plan,
            Tenant,
            TenantCounts,
            TenantSummary,
            TenantDetailResponse,
            TenantPlanInfo,
            Note,
            CreateNoteDto,
            UpdateNoteDto,
            NoteResponse,
            NoteMutationResponse,
            NotesResponse,
            SignupRequest,
            SignupResponse,
            SigninRequest,
            SigninResponse,
            MeResponse,
            MessageResponse,
            InviteUserDto,
            InviteResponse,
            UpgradeResponse,
            UpgradeUserDto,
            UpgradeUserResponse,
            TokenPayload,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, signin and the caller's profile"),
        (name = "Notes", description = "Notes owned by the caller"),
        (name = "Tenants", description = "Tenant summary, invites and plan upgrades"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Notely API",
        version = "0.1.0",
        description = "Multi-tenant notes API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/auth/signup",
            "/auth/signin",
            "/auth/me",
            "/notes",
            "/notes/{id}",
            "/tenants/{slug}",
            "/tenants/{slug}/invite",
            "/tenants/{slug}/upgrade",
            "/tenants/{slug}/upgrade-user",
            "/health",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
