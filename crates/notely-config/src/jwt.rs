use std::env;

/// Development fallback; startup warns loudly when it is in use.
pub const DEV_SECRET: &str = "notely-dev-secret-change-in-production";

/// One hour.
pub const DEFAULT_ACCESS_EXPIRY: i64 = 3600;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            access_token_expiry: DEFAULT_ACCESS_EXPIRY,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set; using the development secret");
                DEV_SECRET.to_string()
            }
        };

        Self {
            secret,
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|s: &i64| *s > 0)
                .unwrap_or(DEFAULT_ACCESS_EXPIRY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expiry_is_one_hour() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 3600);
        assert_eq!(config.secret, DEV_SECRET);
    }
}
