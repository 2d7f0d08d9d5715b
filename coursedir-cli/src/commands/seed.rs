//! Sample data command

use anyhow::{Context, Result};
use clap::Parser;

use coursedir_server::db::migrations;
use coursedir_server::AppState;

use super::{DatabaseArgs, HashingArgs};

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub hashing: HashingArgs,
}

/// Apply the schema, then load sample data into an empty database
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let hasher = args.hashing.build()?;
    let pool = args.database.connect().await?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    let state = AppState::postgres(pool, hasher);
    let seeded = coursedir_server::seed::seed(&state)
        .await
        .context("Failed to seed database")?;

    if seeded {
        println!("Seeded sample users and courses");
    } else {
        println!("Database already has data; nothing seeded");
    }
    Ok(())
}
