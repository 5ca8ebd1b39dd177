//! Create an administrator account with full privileges.
//!
//! ```text
//! create-superuser --email admin@example.com --password '...' [--username admin]
//! ```
//!
//! The password may also come from `FOLIO_SUPERUSER_PASSWORD`.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::accounts::{create_superuser, NewAccount};

#[derive(Debug, Parser)]
#[command(name = "create-superuser", about = "Create a superuser account")]
struct Cli {
    #[arg(long)]
    email: String,

    #[arg(long, env = "FOLIO_SUPERUSER_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long)]
    username: Option<String>,

    #[arg(long)]
    full_name: Option<String>,

    #[arg(long)]
    phone_number: Option<String>,

    /// Must not be `false` for a superuser.
    #[arg(long)]
    is_staff: Option<bool>,

    /// Must not be `false` for a superuser.
    #[arg(long)]
    is_superuser: Option<bool>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = folio_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    folio_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let account = NewAccount {
        email: cli.email,
        username: cli.username,
        full_name: cli.full_name,
        phone_number: cli.phone_number,
        password: cli.password,
    };
    let user = create_superuser(&pool, account, cli.is_staff, cli.is_superuser)
        .await
        .context("Could not create superuser")?;

    tracing::info!(user_id = user.id, email = %user.email, "Superuser ready");
    Ok(())
}
