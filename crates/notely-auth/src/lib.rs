//! # Notely Auth
//!
//! Bearer token claims and JWT signing/verification.
//!
//! - [`claims`]: the identity payload `{id, email, role, tenantId}` and the
//!   signed [`Claims`] envelope around it
//! - [`jwt`]: [`sign_token`] and [`verify_token`]
//!
//! # Example
//!
//! ```ignore
//! use notely_auth::{TokenPayload, sign_token, verify_token};
//! use notely_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = sign_token(&payload, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.payload, payload);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, TokenPayload};
pub use jwt::{sign_token, sign_token_with_ttl, verify_token};
