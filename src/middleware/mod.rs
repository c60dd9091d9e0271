//! Request extractors for authentication and authorization.
//!
//! - [`auth`]: [`auth::AuthUser`] validates the bearer token and exposes the
//!   caller's identity
//! - [`role`]: [`role::RequireAdmin`] and friends layer a role check on top
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. A missing or malformed header is rejected with 401
//! 3. An invalid or expired token is rejected with 403
//! 4. Role extractors reject with 403 when the role does not match
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::RequireAdmin;
//!
//! async fn list_notes(auth_user: AuthUser) -> impl IntoResponse {
//!     let scope = auth_user.scope();
//!     // ...
//! }
//!
//! async fn invite(admin: RequireAdmin) -> impl IntoResponse {
//!     let auth_user = admin.into_inner();
//!     // ...
//! }
//! ```

pub mod auth;
pub mod role;
