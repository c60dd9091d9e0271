//! Tenant and user seeding.

use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use notely_config::PasswordConfig;
use notely_core::{hash_password, slugify};
use notely_db::is_unique_violation;
use notely_models::{TenantId, UserId, UserRole};

use super::models::{DEMO_TENANTS, DemoTenant, NewTenant};

async fn upsert_user(
    tx: &mut Transaction<'_, Postgres>,
    tenant_id: TenantId,
    email: &str,
    name: &str,
    role: UserRole,
    password_hash: &str,
) -> anyhow::Result<UserId> {
    let inserted = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (email, password, name, role, tenant_id)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(role)
    .bind(tenant_id)
    .fetch_optional(&mut **tx)
    .await?;

    match inserted {
        Some(id) => Ok(id),
        None => {
            let id = sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(&mut **tx)
                .await?;
            Ok(id)
        }
    }
}

/// Creates (or finds) a demo tenant with its admin and member.
/// Returns the two user ids.
pub async fn seed_tenant(
    db: &PgPool,
    demo: DemoTenant,
    password_hash: &str,
) -> anyhow::Result<Vec<UserId>> {
    let start_time = Instant::now();
    let mut tx = db.begin().await?;

    let tenant_id = sqlx::query_scalar::<_, TenantId>(
        "INSERT INTO tenants (name, slug) VALUES ($1, $2)
         ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(demo.name)
    .bind(demo.slug)
    .fetch_one(&mut *tx)
    .await?;

    let admin = upsert_user(
        &mut tx,
        tenant_id,
        &demo.admin_email(),
        &format!("{} Admin", demo.name),
        UserRole::Admin,
        password_hash,
    )
    .await?;

    let member = upsert_user(
        &mut tx,
        tenant_id,
        &demo.member_email(),
        &format!("{} User", demo.name),
        UserRole::Member,
        password_hash,
    )
    .await?;

    tx.commit().await?;

    println!(
        "   ✓ Tenant {} ready in {:?}",
        demo.slug,
        start_time.elapsed()
    );

    Ok(vec![admin, member])
}

/// Creates a tenant and its first ADMIN in one transaction.
pub async fn create_tenant(
    db: &PgPool,
    input: &NewTenant,
    password_config: &PasswordConfig,
) -> anyhow::Result<(TenantId, UserId)> {
    let slug = slugify(&input.slug);
    if slug.is_empty() {
        anyhow::bail!("Slug must contain at least one letter or digit");
    }

    let password_hash = hash_password(&input.admin_password, password_config)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;

    let tenant_id = sqlx::query_scalar::<_, TenantId>(
        "INSERT INTO tenants (name, slug) VALUES ($1, $2) RETURNING id",
    )
    .bind(&input.name)
    .bind(&slug)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            anyhow::anyhow!("Tenant '{}' already exists", slug)
        } else {
            anyhow::Error::from(e)
        }
    })?;

    let user_id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (email, password, name, role, tenant_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(input.admin_email.trim().to_lowercase())
    .bind(&password_hash)
    .bind(&input.admin_name)
    .bind(UserRole::Admin)
    .bind(tenant_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            anyhow::anyhow!("Email '{}' is already registered", input.admin_email)
        } else {
            anyhow::Error::from(e)
        }
    })?;

    tx.commit().await?;

    Ok((tenant_id, user_id))
}

/// Deletes the demo tenants; users and notes go with them.
pub async fn clear_demo(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing demo tenants...");

    let slugs: Vec<&str> = DEMO_TENANTS.iter().map(|demo| demo.slug).collect();
    let result = sqlx::query("DELETE FROM tenants WHERE slug = ANY($1)")
        .bind(&slugs)
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} tenants in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
