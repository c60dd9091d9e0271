//! # Notely Config
//!
//! Configuration types for the Notely API, loaded once from environment
//! variables at startup and handed to the services by reference.
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`password`]: bcrypt work factor
//! - [`cors`]: allowed browser origins
//! - [`server`]: listen address
//!
//! # Example
//!
//! ```ignore
//! use notely_config::{CorsConfig, JwtConfig, PasswordConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let password_config = PasswordConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! println!("listening on {}", server_config.addr());
//! ```

pub mod cors;
pub mod jwt;
pub mod password;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;
