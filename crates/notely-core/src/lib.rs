//! # Notely Core
//!
//! Foundational types shared by every Notely crate:
//!
//! - [`errors`]: the [`AppError`] type and its HTTP rendering
//! - [`password`]: bcrypt hashing and verification
//! - [`slug`]: tenant slug derivation

pub mod errors;
pub mod password;
pub mod slug;

pub use errors::{AppError, codes};
pub use password::{hash_password, verify_password};
pub use slug::{slug_from_email, slugify, title_case};
