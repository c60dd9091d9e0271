//! Demo data seeding.
//!
//! Seeding is idempotent: tenants are matched by slug and users by email, so
//! running `seed` twice leaves one copy of each. Notes are topped up to the
//! requested count without exceeding the author's plan limit.

mod models;
mod notes;
mod tenants;

pub use models::{DEMO_PASSWORD, DEMO_TENANTS, DemoTenant, NewTenant, SeedConfig};
pub use notes::{generate_notes, notes_to_create, seed_notes_for_user};
pub use tenants::{clear_demo, create_tenant, seed_tenant};

use sqlx::PgPool;
use std::time::Instant;

use notely_core::hash_password;

/// Seeds every demo tenant with an admin, a member and optional notes.
pub async fn seed_demo(db: &PgPool, config: &SeedConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🌱 Seeding {} demo tenants...", DEMO_TENANTS.len());

    let password_hash = hash_password(DEMO_PASSWORD, &config.password_config)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.error))?;

    for demo in DEMO_TENANTS {
        let users = seed_tenant(db, demo, &password_hash).await?;

        if config.notes_per_user > 0 {
            for user_id in users {
                seed_notes_for_user(db, user_id, config.notes_per_user).await?;
            }
        }
    }

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    println!("   Sign in with admin@<slug>.test or user@<slug>.test / {DEMO_PASSWORD}");

    Ok(())
}
