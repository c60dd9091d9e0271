use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{create_note, delete_note, get_note, list_notes, update_note};

pub fn init_notes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notes).post(create_note))
        .route("/{id}", get(get_note).put(update_note).delete(delete_note))
}
