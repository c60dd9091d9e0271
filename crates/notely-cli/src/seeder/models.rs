use notely_config::PasswordConfig;

pub const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Clone, Copy)]
pub struct DemoTenant {
    pub slug: &'static str,
    pub name: &'static str,
}

impl DemoTenant {
    pub fn admin_email(&self) -> String {
        format!("admin@{}.test", self.slug)
    }

    pub fn member_email(&self) -> String {
        format!("user@{}.test", self.slug)
    }
}

pub const DEMO_TENANTS: [DemoTenant; 2] = [
    DemoTenant {
        slug: "acme",
        name: "Acme",
    },
    DemoTenant {
        slug: "globex",
        name: "Globex",
    },
];

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub notes_per_user: usize,
    pub password_config: PasswordConfig,
}

impl SeedConfig {
    pub fn new(notes_per_user: usize) -> Self {
        Self {
            notes_per_user,
            password_config: PasswordConfig::from_env(),
        }
    }
}

/// Input for `create-tenant`.
#[derive(Debug, Clone)]
pub struct NewTenant {
    pub name: String,
    pub slug: String,
    pub admin_email: String,
    pub admin_name: String,
    pub admin_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_emails() {
        let acme = DEMO_TENANTS[0];
        assert_eq!(acme.admin_email(), "admin@acme.test");
        assert_eq!(acme.member_email(), "user@acme.test");
    }

    #[test]
    fn test_demo_slugs_are_valid() {
        for demo in DEMO_TENANTS {
            assert_eq!(notely_core::slugify(demo.slug), demo.slug);
        }
    }
}
