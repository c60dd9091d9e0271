//! Note domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::{NoteId, TenantId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub tenant_id: TenantId,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub const NOTE_COLUMNS: &str =
    "id, title, content, author_id, tenant_id, created_at, updated_at";

fn validate_title(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new("title_blank").with_message("title must not be blank".into()),
        );
    }
    Ok(())
}

fn validate_content(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new("content_blank").with_message("content must not be blank".into()),
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNoteDto {
    #[validate(
        length(max = 255, message = "title must be at most 255 characters"),
        custom(function = "validate_title")
    )]
    pub title: String,
    #[validate(custom(function = "validate_content"))]
    pub content: String,
}

/// Partial update; at least one field must be present. Present fields are
/// validated like on create.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateNoteDto {
    #[validate(
        length(max = 255, message = "title must be at most 255 characters"),
        custom(function = "validate_title")
    )]
    pub title: Option<String>,
    #[validate(custom(function = "validate_content"))]
    pub content: Option<String>,
}

impl UpdateNoteDto {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    pub note: Note,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteMutationResponse {
    pub message: String,
    pub note: Note,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotesResponse {
    pub notes: Vec<Note>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_note_validation() {
        let ok = CreateNoteDto {
            title: "Groceries".to_string(),
            content: "eggs".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty_title = CreateNoteDto {
            title: String::new(),
            content: "eggs".to_string(),
        };
        assert!(empty_title.validate().is_err());

        let long_title = CreateNoteDto {
            title: "t".repeat(256),
            content: "eggs".to_string(),
        };
        assert!(long_title.validate().is_err());
    }

    #[test]
    fn test_whitespace_only_fields_are_blank() {
        let blank_title = CreateNoteDto {
            title: "   ".to_string(),
            content: "eggs".to_string(),
        };
        let errors = blank_title.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["title"][0].message.as_deref(),
            Some("title must not be blank")
        );

        let blank_content = CreateNoteDto {
            title: "Groceries".to_string(),
            content: "\n\t ".to_string(),
        };
        assert!(blank_content.validate().is_err());

        let blank_update = UpdateNoteDto {
            title: None,
            content: Some("  ".to_string()),
        };
        assert!(blank_update.validate().is_err());
    }

    #[test]
    fn test_update_note_dto() {
        assert!(UpdateNoteDto::default().is_empty());

        let blank = UpdateNoteDto {
            title: Some(String::new()),
            content: None,
        };
        assert!(!blank.is_empty());
        assert!(blank.validate().is_err());

        let content_only = UpdateNoteDto {
            title: None,
            content: Some("new body".to_string()),
        };
        assert!(content_only.validate().is_ok());
    }
}
