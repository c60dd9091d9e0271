use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use notely_auth::{TokenPayload, sign_token};
use notely_config::{JwtConfig, PasswordConfig};
use notely_core::{
    AppError, codes, hash_password, slug_from_email, slugify, title_case, verify_password,
};
use notely_db::{is_unique_violation, violated_constraint};
use notely_models::{
    SigninRequest, SignupRequest, Tenant, USER_COLUMNS, User, UserCredentials, UserRole,
};

use crate::metrics;
use crate::middleware::auth::TenantScope;

const TENANT_SLUG_CONSTRAINT: &str = "tenants_slug_key";

pub struct AuthService;

/// Slug and display name for the tenant a signup would create.
fn tenant_identity(dto: &SignupRequest) -> Result<(String, String), AppError> {
    let requested = dto
        .tenant
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let (slug, name) = match requested {
        Some(name) => (slugify(name), name.to_string()),
        None => {
            let slug = slug_from_email(&dto.email).unwrap_or_default();
            let name = title_case(&slug);
            (slug, name)
        }
    };

    if slug.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Could not derive a tenant from the request"
        )));
    }

    Ok((slug, name))
}

fn tenant_exists_error() -> AppError {
    AppError::forbidden(
        "Tenant already exists. Ask an admin of that tenant for an invite".to_string(),
    )
    .with_code(codes::TENANT_EXISTS)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    #[instrument(skip(db, dto, password_config), fields(user.email = %dto.email, db.table = "users"))]
    pub async fn signup(
        db: &PgPool,
        dto: SignupRequest,
        password_config: &PasswordConfig,
    ) -> Result<(User, Tenant), AppError> {
        let email = normalize_email(&dto.email);
        let (slug, tenant_name) = tenant_identity(&dto)?;

        debug!(tenant.slug = %slug, "Processing signup");

        let email_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&email)
                .fetch_one(db)
                .await?;

        if email_taken {
            warn!(user.email = %email, "Signup with registered email");
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email already registered"
            )));
        }

        let slug_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tenants WHERE slug = $1)")
                .bind(&slug)
                .fetch_one(db)
                .await?;

        if slug_taken {
            warn!(tenant.slug = %slug, "Signup for existing tenant");
            metrics::track_signup("tenant_exists");
            return Err(tenant_exists_error());
        }

        let hashed_password = hash_password(&dto.password, password_config)?;

        let mut tx = db.begin().await?;

        let tenant = sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (name, slug) VALUES ($1, $2)
             RETURNING id, name, slug, plan, created_at, updated_at",
        )
        .bind(&tenant_name)
        .bind(&slug)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if violated_constraint(&e) == Some(TENANT_SLUG_CONSTRAINT) {
                warn!(tenant.slug = %slug, "Concurrent signup created the tenant first");
                metrics::track_signup("tenant_exists");
                return tenant_exists_error();
            }
            error!(error = %e, tenant.slug = %slug, "Database error creating tenant");
            AppError::from(e)
        })?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password, name, role, tenant_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&email)
        .bind(&hashed_password)
        .bind(dto.name.trim())
        .bind(UserRole::Admin)
        .bind(tenant.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!(user.email = %email, "Concurrent signup registered the email first");
                return AppError::bad_request(anyhow::anyhow!("Email already registered"));
            }
            error!(error = %e, user.email = %email, "Database error creating user");
            AppError::from(e)
        })?;

        tx.commit().await?;

        metrics::track_signup("created");
        info!(
            user.id = %user.id,
            tenant.id = %tenant.id,
            tenant.slug = %tenant.slug,
            "Tenant and admin created"
        );

        Ok((user, tenant))
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email, db.table = "users"))]
    pub async fn signin(
        db: &PgPool,
        dto: SigninRequest,
        jwt_config: &JwtConfig,
    ) -> Result<(String, User), AppError> {
        let email = normalize_email(&dto.email);

        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password, role, tenant_id FROM users WHERE email = $1",
        )
        .bind(&email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            warn!(user.email = %email, "Signin for unknown email");
            metrics::track_signin_failure("user_not_found");
            AppError::not_found(anyhow::anyhow!("User not found")).with_code(codes::USER_NOT_FOUND)
        })?;

        if !verify_password(&dto.password, &credentials.password)? {
            warn!(user.id = %credentials.id, "Signin with wrong password");
            metrics::track_signin_failure("invalid_credentials");
            return Err(AppError::unauthorized("Invalid credentials".to_string())
                .with_code(codes::INVALID_CREDENTIALS));
        }

        let payload = TokenPayload {
            id: credentials.id,
            email: credentials.email,
            role: credentials.role,
            tenant_id: credentials.tenant_id,
        };
        let token = sign_token(&payload, jwt_config)?;

        let user = Self::find_user(
            db,
            TenantScope {
                tenant_id: payload.tenant_id,
                user_id: payload.id,
            },
        )
        .await?;

        metrics::track_signin_success(user.role.as_str());
        info!(user.id = %user.id, tenant.id = %user.tenant_id, "Signin succeeded");

        Ok((token, user))
    }

    /// The caller's public profile, matched on both id and tenant.
    #[instrument(skip(db), fields(user.id = %scope.user_id, tenant.id = %scope.tenant_id))]
    pub async fn find_user(db: &PgPool, scope: TenantScope) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(scope.user_id)
        .bind(scope.tenant_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
