use std::env;

/// bcrypt work factor used when hashing new passwords.
///
/// `BCRYPT_COST` overrides the library default; values are clamped to the
/// range bcrypt accepts (4..=31).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .map(|c| c.clamp(4, 31))
            .unwrap_or(bcrypt::DEFAULT_COST);

        Self { cost }
    }
}
