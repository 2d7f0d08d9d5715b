//! HTTP server command

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use coursedir_server::db::migrations;
use coursedir_server::http::server::DEFAULT_TIMEOUT_SECS;
use coursedir_server::seed::seed;
use coursedir_server::{run_server, AppState, ServerConfig};

use super::{DatabaseArgs, HashingArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Per-request timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Keep everything in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Insert sample users and courses into an empty database
    #[arg(long)]
    pub seed: bool,

    /// Skip schema creation on startup
    #[arg(long)]
    pub no_migrate: bool,

    #[command(flatten)]
    pub hashing: HashingArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let hasher = args.hashing.build()?;

    let state = if args.in_memory {
        if args.database.database_url.is_some() {
            tracing::warn!("--in-memory set, ignoring database URL");
        }
        tracing::warn!("Using in-memory storage - data is lost on shutdown");
        AppState::in_memory(hasher)
    } else {
        let pool = args.database.connect().await?;
        if !args.no_migrate {
            migrations::run(&pool)
                .await
                .context("Failed to run migrations")?;
        }
        AppState::postgres(pool, hasher)
    };

    if args.seed && seed(&state).await.context("Failed to seed database")? {
        tracing::info!("Sample data loaded");
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.timeout),
    };

    tracing::info!("Starting coursedir server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(Arc::new(state), config)
        .await
        .context("Server error")?;

    Ok(())
}
