//! # Notely CLI
//!
//! Database seeding and tenant bootstrap utilities for development.
//!
//! ## Usage
//!
//! ```ignore
//! use notely_cli::seeder::{seed_demo, SeedConfig};
//!
//! let config = SeedConfig::new(3); // three fake notes per user, capped by plan
//! seed_demo(&pool, &config).await?;
//! ```

pub mod seeder;
