use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{me, signin, signup};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/me", get(me))
}
