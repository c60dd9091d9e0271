//! Note storage scoped to the caller.
//!
//! Every query filters on both `tenant_id` and `author_id`, so a note written
//! by another user is indistinguishable from one that does not exist.

use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use notely_core::{AppError, codes};
use notely_models::{CreateNoteDto, NOTE_COLUMNS, Note, NoteId, Plan, UpdateNoteDto};

use crate::metrics;
use crate::middleware::auth::TenantScope;

pub struct NoteService;

fn note_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Note not found"))
}

impl NoteService {
    /// Inserts a note after checking the author's plan quota.
    ///
    /// The author row is locked for the duration of the transaction, so two
    /// concurrent creates for one author cannot both pass the count.
    #[instrument(skip(db, dto), fields(user.id = %scope.user_id, tenant.id = %scope.tenant_id, db.table = "notes"))]
    pub async fn create_note(
        db: &PgPool,
        scope: TenantScope,
        dto: CreateNoteDto,
    ) -> Result<Note, AppError> {
        let mut tx = db.begin().await?;

        let plan = sqlx::query_scalar::<_, Plan>(
            "SELECT plan FROM users WHERE id = $1 AND tenant_id = $2 FOR UPDATE",
        )
        .bind(scope.user_id)
        .bind(scope.tenant_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notes WHERE author_id = $1 AND tenant_id = $2",
        )
        .bind(scope.user_id)
        .bind(scope.tenant_id)
        .fetch_one(&mut *tx)
        .await?;

        debug!(plan = %plan.as_str(), existing, "Checking note quota");

        if !plan.allows_another_note(existing) {
            warn!(existing, "Free plan note limit reached");
            metrics::track_quota_rejection();
            return Err(AppError::forbidden(
                "Free plan limit reached. Upgrade to PRO to create more notes".to_string(),
            )
            .with_code(codes::PLAN_LIMIT_REACHED));
        }

        let note = sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes (title, content, author_id, tenant_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(scope.user_id)
        .bind(scope.tenant_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        metrics::track_note_created(plan.as_str());
        info!(note.id = %note.id, "Note created");

        Ok(note)
    }

    /// Caller's notes, newest first.
    #[instrument(skip(db), fields(user.id = %scope.user_id, tenant.id = %scope.tenant_id, db.table = "notes"))]
    pub async fn list_notes(db: &PgPool, scope: TenantScope) -> Result<Vec<Note>, AppError> {
        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE tenant_id = $1 AND author_id = $2
             ORDER BY created_at DESC"
        ))
        .bind(scope.tenant_id)
        .bind(scope.user_id)
        .fetch_all(db)
        .await?;

        debug!(count = notes.len(), "Notes fetched");

        Ok(notes)
    }

    #[instrument(skip(db), fields(note.id = %note_id, user.id = %scope.user_id, db.table = "notes"))]
    pub async fn get_note(
        db: &PgPool,
        scope: TenantScope,
        note_id: NoteId,
    ) -> Result<Note, AppError> {
        sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE id = $1 AND tenant_id = $2 AND author_id = $3"
        ))
        .bind(note_id)
        .bind(scope.tenant_id)
        .bind(scope.user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(note_not_found)
    }

    /// Applies the fields present in `dto`; absent fields keep their values.
    #[instrument(skip(db, dto), fields(note.id = %note_id, user.id = %scope.user_id, db.table = "notes"))]
    pub async fn update_note(
        db: &PgPool,
        scope: TenantScope,
        note_id: NoteId,
        dto: UpdateNoteDto,
    ) -> Result<Note, AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "At least one of title or content is required"
            )));
        }

        Self::get_note(db, scope, note_id).await?;

        let note = sqlx::query_as::<_, Note>(&format!(
            "UPDATE notes
             SET title = COALESCE($4, title),
                 content = COALESCE($5, content),
                 updated_at = NOW()
             WHERE id = $1 AND tenant_id = $2 AND author_id = $3
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(note_id)
        .bind(scope.tenant_id)
        .bind(scope.user_id)
        .bind(dto.title.as_deref())
        .bind(dto.content.as_deref())
        .fetch_optional(db)
        .await?
        .ok_or_else(note_not_found)?;

        info!("Note updated");

        Ok(note)
    }

    #[instrument(skip(db), fields(note.id = %note_id, user.id = %scope.user_id, db.table = "notes"))]
    pub async fn delete_note(
        db: &PgPool,
        scope: TenantScope,
        note_id: NoteId,
    ) -> Result<(), AppError> {
        Self::get_note(db, scope, note_id).await?;

        let result =
            sqlx::query("DELETE FROM notes WHERE id = $1 AND tenant_id = $2 AND author_id = $3")
                .bind(note_id)
                .bind(scope.tenant_id)
                .bind(scope.user_id)
                .execute(db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(note_not_found());
        }

        info!("Note deleted");

        Ok(())
    }
}
