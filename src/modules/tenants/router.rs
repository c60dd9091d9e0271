use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_tenant, invite_user, upgrade_tenant, upgrade_user};

pub fn init_tenants_router() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(get_tenant))
        .route("/{slug}/invite", post(invite_user))
        .route("/{slug}/upgrade", post(upgrade_tenant))
        .route("/{slug}/upgrade-user", post(upgrade_user))
}
