use rand::{Rng, distributions::Alphanumeric};
use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use notely_config::PasswordConfig;
use notely_core::{AppError, hash_password};
use notely_db::is_unique_violation;
use notely_models::{
    InviteUserDto, Plan, Tenant, TenantCounts, TenantDetailResponse, TenantId, TenantSummary,
    USER_COLUMNS, UpgradeUserDto, User, UserId,
};

use crate::metrics;
use crate::modules::auth::service::normalize_email;

const TEMPORARY_PASSWORD_LENGTH: usize = 16;

pub struct TenantService;

enum UpgradeTarget {
    Id(UserId),
    Email(String),
}

pub(crate) fn generate_temporary_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMPORARY_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

fn email_taken() -> AppError {
    AppError::bad_request(anyhow::anyhow!("Email already registered"))
}

impl TenantService {
    /// Loads the caller's tenant and checks it is the one named in the path.
    ///
    /// A slug that does not exist is reported exactly like a foreign one.
    #[instrument(skip(db), fields(tenant.id = %tenant_id, db.table = "tenants"))]
    pub async fn resolve_own_tenant(
        db: &PgPool,
        tenant_id: TenantId,
        slug: &str,
    ) -> Result<Tenant, AppError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            "SELECT id, name, slug, plan, created_at, updated_at FROM tenants WHERE id = $1",
        )
        .bind(tenant_id)
        .fetch_optional(db)
        .await?;

        match tenant {
            Some(tenant) if tenant.slug == slug => Ok(tenant),
            _ => {
                warn!(requested.slug = %slug, "Access to another tenant denied");
                Err(AppError::forbidden(
                    "Access denied to this tenant".to_string(),
                ))
            }
        }
    }

    /// Tenant summary with counts; `members` only when `include_members`.
    #[instrument(skip(db, tenant), fields(tenant.id = %tenant.id))]
    pub async fn tenant_detail(
        db: &PgPool,
        tenant: Tenant,
        include_members: bool,
    ) -> Result<TenantDetailResponse, AppError> {
        let (users, notes) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT
                (SELECT COUNT(*) FROM users WHERE tenant_id = $1),
                (SELECT COUNT(*) FROM notes WHERE tenant_id = $1)",
        )
        .bind(tenant.id)
        .fetch_one(db)
        .await?;

        let members = if include_members {
            Some(
                sqlx::query_as::<_, User>(&format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE tenant_id = $1 ORDER BY created_at"
                ))
                .bind(tenant.id)
                .fetch_all(db)
                .await?,
            )
        } else {
            None
        };

        debug!(users, notes, "Tenant counts loaded");

        Ok(TenantDetailResponse {
            tenant: TenantSummary {
                id: tenant.id,
                slug: tenant.slug,
                name: tenant.name,
                plan: tenant.plan,
                counts: TenantCounts { users, notes },
            },
            members,
        })
    }

    /// Creates a user in `tenant_id`. Returns the generated password when the
    /// request did not carry one.
    #[instrument(skip(db, dto, password_config), fields(tenant.id = %tenant_id, user.email = %dto.email, db.table = "users"))]
    pub async fn invite_user(
        db: &PgPool,
        tenant_id: TenantId,
        dto: InviteUserDto,
        password_config: &PasswordConfig,
    ) -> Result<(User, Option<String>), AppError> {
        let email = normalize_email(&dto.email);

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&email)
                .fetch_one(db)
                .await?;

        if exists {
            warn!(user.email = %email, "Invite for registered email");
            return Err(email_taken());
        }

        let (password, temporary_password) = match dto.password {
            Some(password) => (password, None),
            None => {
                let generated = generate_temporary_password();
                (generated.clone(), Some(generated))
            }
        };
        let hashed_password = hash_password(&password, password_config)?;
        let role = dto.role.unwrap_or_default();

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password, name, role, tenant_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&email)
        .bind(&hashed_password)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(role)
        .bind(tenant_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!(user.email = %email, "Invite raced with another registration");
                return email_taken();
            }
            error!(error = %e, user.email = %email, "Database error inviting user");
            AppError::from(e)
        })?;

        metrics::track_user_invited(role.as_str());
        info!(user.id = %user.id, user.role = %role, "User invited");

        Ok((user, temporary_password))
    }

    /// Sets both the tenant's and the caller's plan to PRO atomically.
    #[instrument(skip(db), fields(tenant.id = %tenant_id, user.id = %user_id))]
    pub async fn upgrade_tenant(
        db: &PgPool,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<(Tenant, User), AppError> {
        let mut tx = db.begin().await?;

        let tenant = sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET plan = $2, updated_at = NOW() WHERE id = $1
             RETURNING id, name, slug, plan, created_at, updated_at",
        )
        .bind(tenant_id)
        .bind(Plan::Pro)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Tenant not found")))?;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET plan = $3, updated_at = NOW()
             WHERE id = $1 AND tenant_id = $2
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(tenant_id)
        .bind(Plan::Pro)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        tx.commit().await?;

        metrics::track_plan_upgrade("tenant");
        info!(tenant.slug = %tenant.slug, "Tenant upgraded to PRO");

        Ok((tenant, user))
    }

    /// Upgrades one user of `tenant_id`, found by id or else by email.
    #[instrument(skip(db, dto), fields(tenant.id = %tenant_id))]
    pub async fn upgrade_user(
        db: &PgPool,
        tenant_id: TenantId,
        dto: UpgradeUserDto,
    ) -> Result<User, AppError> {
        let (column, target) = match (dto.user_id, dto.email.as_deref()) {
            (Some(user_id), _) => ("id", UpgradeTarget::Id(user_id)),
            (None, Some(email)) => ("email", UpgradeTarget::Email(normalize_email(email))),
            (None, None) => {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "userId or email is required"
                )));
            }
        };

        let sql = format!(
            "UPDATE users SET plan = $3, updated_at = NOW()
             WHERE {column} = $1 AND tenant_id = $2
             RETURNING {USER_COLUMNS}"
        );
        let query = sqlx::query_as::<_, User>(&sql);
        let query = match target {
            UpgradeTarget::Id(user_id) => query.bind(user_id),
            UpgradeTarget::Email(email) => query.bind(email),
        };

        let user = query
            .bind(tenant_id)
            .bind(Plan::Pro)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                warn!("Upgrade target not found in tenant");
                AppError::not_found(anyhow::anyhow!("User not found"))
            })?;

        metrics::track_plan_upgrade("user");
        info!(user.id = %user.id, "User upgraded to PRO");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_password_shape() {
        let password = generate_temporary_password();
        assert_eq!(password.len(), TEMPORARY_PASSWORD_LENGTH);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_temporary_passwords_differ() {
        assert_ne!(generate_temporary_password(), generate_temporary_password());
    }
}
