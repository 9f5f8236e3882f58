//! CLI for provisioning the roster database
//!
//! Applies the schema, seeds the default catalog and accounts, and hashes
//! passwords for accounts added by hand. Output is one JSON object per line.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use clubs_core::common::seed_database;
use clubs_core::config::Config;
use clubs_core::domains::auth::password::hash_password;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema and seed data CLI for the roster database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Insert default accounts and activities into an empty database
    Seed,

    /// Print an argon2 hash for a password
    HashPassword { password: String },
}

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
}

fn output(resp: Response) -> Result<()> {
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => cmd_migrate().await,
        Commands::Seed => cmd_seed().await,
        Commands::HashPassword { password } => cmd_hash_password(&password),
    }
}

async fn get_pool() -> Result<PgPool> {
    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;
    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn cmd_migrate() -> Result<()> {
    let pool = get_pool().await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    output(Response {
        success: true,
        message: Some("Migrations complete".to_string()),
        hash: None,
    })
}

async fn cmd_seed() -> Result<()> {
    let pool = get_pool().await?;

    let message = if seed_database(&pool).await? {
        "Initial data seeded"
    } else {
        "Database already seeded"
    };

    output(Response {
        success: true,
        message: Some(message.to_string()),
        hash: None,
    })
}

fn cmd_hash_password(password: &str) -> Result<()> {
    output(Response {
        success: true,
        message: None,
        hash: Some(hash_password(password)?),
    })
}
