#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use notely::router::init_router;
use notely::state::AppState;
use notely_auth::{TokenPayload, sign_token, sign_token_with_ttl};
use notely_config::{CorsConfig, JwtConfig, PasswordConfig};
use notely_core::hash_password;
use notely_models::{Plan, TenantId, UserId, UserRole};

pub const TEST_PASSWORD: &str = "password123";

pub struct TestTenant {
    pub id: TenantId,
    pub slug: String,
}

pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub tenant_id: TenantId,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-characters".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn test_password_config() -> PasswordConfig {
    PasswordConfig { cost: 4 }
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        password_config: test_password_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

pub fn generate_unique_slug() -> String {
    format!("t-{}", &Uuid::new_v4().simple().to_string()[..12])
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub async fn create_test_tenant(pool: &PgPool, slug: &str, plan: Plan) -> TestTenant {
    let id = sqlx::query_scalar::<_, TenantId>(
        "INSERT INTO tenants (name, slug, plan) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(format!("Tenant {slug}"))
    .bind(slug)
    .bind(plan)
    .fetch_one(pool)
    .await
    .unwrap();

    TestTenant {
        id,
        slug: slug.to_string(),
    }
}

pub async fn create_test_user(
    pool: &PgPool,
    tenant_id: TenantId,
    email: &str,
    role: UserRole,
    plan: Plan,
) -> TestUser {
    let hashed = hash_password(TEST_PASSWORD, &test_password_config()).unwrap();

    let id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (email, password, name, role, plan, tenant_id)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .bind("Test User")
    .bind(role)
    .bind(plan)
    .bind(tenant_id)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        role,
        tenant_id,
    }
}

/// A tenant with one ADMIN and one MEMBER, all on `plan`.
pub async fn create_tenant_with_users(
    pool: &PgPool,
    plan: Plan,
) -> (TestTenant, TestUser, TestUser) {
    let tenant = create_test_tenant(pool, &generate_unique_slug(), plan).await;
    let admin = create_test_user(
        pool,
        tenant.id,
        &generate_unique_email(),
        UserRole::Admin,
        plan,
    )
    .await;
    let member = create_test_user(
        pool,
        tenant.id,
        &generate_unique_email(),
        UserRole::Member,
        plan,
    )
    .await;
    (tenant, admin, member)
}

fn payload_for(user: &TestUser) -> TokenPayload {
    TokenPayload {
        id: user.id,
        email: user.email.clone(),
        role: user.role,
        tenant_id: user.tenant_id,
    }
}

pub fn token_for(user: &TestUser) -> String {
    sign_token(&payload_for(user), &test_jwt_config()).unwrap()
}

pub fn expired_token_for(user: &TestUser) -> String {
    sign_token_with_ttl(&payload_for(user), -60, &test_jwt_config()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
