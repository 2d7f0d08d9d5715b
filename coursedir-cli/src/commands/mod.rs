//! Command implementations for the coursedir CLI

use anyhow::{Context, Result};
use clap::Args;

use coursedir_server::auth::{HashingConfig, PasswordHasher};
use coursedir_server::db::{create_pool_with_options, PgPool, DEFAULT_MAX_CONNECTIONS};

pub mod migrate;
pub mod seed;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use seed::run_seed;
pub use serve::run_serve;

/// Database connection options shared by every command
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    pub async fn connect(&self) -> Result<PgPool> {
        let url = self
            .database_url
            .as_deref()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        create_pool_with_options(url, self.max_connections)
            .await
            .context("Failed to create database pool")
    }
}

/// Argon2 work factors; unset flags keep the library defaults
#[derive(Args, Debug, Default)]
pub struct HashingArgs {
    /// Argon2 memory cost in KiB
    #[arg(long, env = "COURSEDIR_HASH_MEMORY_KIB")]
    pub hash_memory_kib: Option<u32>,

    /// Argon2 iterations (time cost)
    #[arg(long, env = "COURSEDIR_HASH_ITERATIONS")]
    pub hash_iterations: Option<u32>,

    /// Argon2 lanes (parallelism)
    #[arg(long, env = "COURSEDIR_HASH_PARALLELISM")]
    pub hash_parallelism: Option<u32>,
}

impl HashingArgs {
    pub fn config(&self) -> HashingConfig {
        let defaults = HashingConfig::default();
        HashingConfig {
            memory_kib: self.hash_memory_kib.unwrap_or(defaults.memory_kib),
            iterations: self.hash_iterations.unwrap_or(defaults.iterations),
            parallelism: self.hash_parallelism.unwrap_or(defaults.parallelism),
        }
    }

    pub fn build(&self) -> Result<PasswordHasher> {
        let config = self.config();
        tracing::debug!(?config, "password hashing parameters");
        PasswordHasher::new(config).context("Invalid password hashing parameters")
    }
}
