use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use tracing::instrument;

use notely_core::AppError;
use notely_models::{
    CreateNoteDto, MessageResponse, NoteId, NoteMutationResponse, NoteResponse, NotesResponse,
    UpdateNoteDto,
};

use super::service::NoteService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

fn note_id(path: Result<Path<NoteId>, PathRejection>) -> Result<NoteId, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid note id")))
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteDto,
    responses(
        (status = 201, description = "Note created", body = NoteMutationResponse),
        (status = 400, description = "Missing title or content", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Invalid token or plan limit reached (PLAN_LIMIT_REACHED)", body = ErrorResponse)
    ),
    tag = "Notes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id()))]
pub async fn create_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateNoteDto>,
) -> Result<(StatusCode, Json<NoteMutationResponse>), AppError> {
    let note = NoteService::create_note(&state.db, auth_user.scope(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(NoteMutationResponse {
            message: "Note created".to_string(),
            note,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "Caller's notes, newest first", body = NotesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Notes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn list_notes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<NotesResponse>, AppError> {
    let notes = NoteService::list_notes(&state.db, auth_user.scope()).await?;
    Ok(Json(NotesResponse { notes }))
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note", body = NoteResponse),
        (status = 400, description = "Malformed note id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "Notes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, path), fields(user.id = %auth_user.user_id()))]
pub async fn get_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<NoteId>, PathRejection>,
) -> Result<Json<NoteResponse>, AppError> {
    let id = note_id(path)?;
    let note = NoteService::get_note(&state.db, auth_user.scope(), id).await?;
    Ok(Json(NoteResponse { note }))
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    request_body = UpdateNoteDto,
    responses(
        (status = 200, description = "Note updated", body = NoteMutationResponse),
        (status = 400, description = "Malformed id or no fields to update", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "Notes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, path, dto), fields(user.id = %auth_user.user_id()))]
pub async fn update_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<NoteId>, PathRejection>,
    ValidatedJson(dto): ValidatedJson<UpdateNoteDto>,
) -> Result<Json<NoteMutationResponse>, AppError> {
    let id = note_id(path)?;
    let note = NoteService::update_note(&state.db, auth_user.scope(), id, dto).await?;
    Ok(Json(NoteMutationResponse {
        message: "Note updated".to_string(),
        note,
    }))
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 400, description = "Malformed note id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "Notes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, path), fields(user.id = %auth_user.user_id()))]
pub async fn delete_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<NoteId>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = note_id(path)?;
    NoteService::delete_note(&state.db, auth_user.scope(), id).await?;
    Ok(Json(MessageResponse {
        message: "Note deleted".to_string(),
    }))
}
