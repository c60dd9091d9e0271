//! Fake note generation.

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use sqlx::PgPool;

use notely_models::{Plan, UserId};

/// Title/content pairs for `count` notes.
pub fn generate_notes(count: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|_| {
            let title: String = Sentence(2..6).fake();
            let content: String = Paragraph(1..4).fake();
            (title.trim_end_matches('.').to_string(), content)
        })
        .collect()
}

/// How many notes to add so the author reaches `requested` without passing
/// their plan limit.
pub fn notes_to_create(plan: Plan, existing: i64, requested: usize) -> usize {
    let target = match plan.note_limit() {
        Some(limit) => (requested as i64).min(limit),
        None => requested as i64,
    };
    (target - existing).max(0) as usize
}

/// Tops up `user_id`'s notes to `requested`, respecting their plan.
pub async fn seed_notes_for_user(
    db: &PgPool,
    user_id: UserId,
    requested: usize,
) -> anyhow::Result<usize> {
    let mut tx = db.begin().await?;

    let (plan, tenant_id) = sqlx::query_as::<_, (Plan, notely_models::TenantId)>(
        "SELECT plan, tenant_id FROM users WHERE id = $1 FOR UPDATE",
    )
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    let existing =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notes WHERE author_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

    let count = notes_to_create(plan, existing, requested);

    for (title, content) in generate_notes(count) {
        sqlx::query(
            "INSERT INTO notes (title, content, author_id, tenant_id) VALUES ($1, $2, $3, $4)",
        )
        .bind(&title)
        .bind(&content)
        .bind(user_id)
        .bind(tenant_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    if count > 0 {
        println!("   ✓ Added {} notes for user {}", count, user_id);
    }

    Ok(count)
}
