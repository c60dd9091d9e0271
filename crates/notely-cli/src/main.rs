use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use notely_cli::seeder::{self, NewTenant, SeedConfig};
use notely_config::PasswordConfig;
use notely_core::{slugify, title_case};
use notely_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "notely-cli")]
#[command(about = "Notely CLI - Administrative tools for Notely", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed demo tenants (acme, globex) with an admin and a member each
    Seed {
        /// Fake notes per user, capped by the user's plan
        #[arg(short = 'n', long, default_value = "0")]
        notes: usize,
    },
    /// Create a tenant and its first admin
    CreateTenant {
        /// Display name of the tenant
        #[arg(long)]
        name: Option<String>,

        /// URL slug (derived from the name when omitted)
        #[arg(short = 's', long)]
        slug: Option<String>,

        /// Admin email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Admin display name
        #[arg(long)]
        admin_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Delete the demo tenants and everything in them
    Clear,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Seed { notes } => seeder::seed_demo(&pool, &SeedConfig::new(notes)).await,
        Commands::CreateTenant {
            name,
            slug,
            email,
            admin_name,
            password,
        } => handle_create_tenant(&pool, name, slug, email, admin_name, password).await,
        Commands::Clear => seeder::clear_demo(&pool).await.map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn handle_create_tenant(
    pool: &PgPool,
    name: Option<String>,
    slug: Option<String>,
    email: Option<String>,
    admin_name: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Tenant name").interact_text()?,
    };

    let slug = match slug {
        Some(slug) => slug,
        None => Input::new()
            .with_prompt("Tenant slug")
            .default(slugify(&name))
            .interact_text()?,
    };

    let admin_email: String = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Admin email").interact_text()?,
    };

    let admin_name = match admin_name {
        Some(admin_name) => admin_name,
        None => Input::new()
            .with_prompt("Admin name")
            .default(format!("{} Admin", title_case(&slugify(&name))))
            .interact_text()?,
    };

    let admin_password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    if admin_password.len() < 8 {
        anyhow::bail!("Password must be at least 8 characters");
    }

    let input = NewTenant {
        name,
        slug,
        admin_email,
        admin_name,
        admin_password,
    };

    let (tenant_id, user_id) =
        seeder::create_tenant(pool, &input, &PasswordConfig::from_env()).await?;

    println!("\n✅ Tenant created successfully!");
    println!("   Tenant: {} ({})", input.name, tenant_id);
    println!("   Admin: {} ({})", input.admin_email, user_id);

    Ok(())
}
