use notely_config::{CorsConfig, JwtConfig, PasswordConfig};
use notely_db::{PgPool, init_db_pool};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// State around an existing pool with configuration read from the environment.
    pub fn with_pool(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            password_config: PasswordConfig::from_env(),
            cors_config: CorsConfig::from_env(),
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool().await?;
    Ok(AppState::with_pool(db))
}
