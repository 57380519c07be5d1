//! # Gamevault Server
//!
//! Serves the game catalog over HTTP, backed by PostgreSQL.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use gamevault_core::{GameRepository, InMemoryGameRepository};
use gamevault_server::{
    create_app,
    infra::{
        config::{Config, ConfigLoad, ConfigLoader},
        startup::{build_state, connect_postgres},
    },
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "gamevault-server")]
#[command(about = "Game catalog service with cover art lookup")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a TOML config file
    #[arg(short, long, env = "GAMEVAULT_CONFIG")]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Keep the catalog in process memory instead of PostgreSQL
    #[arg(long, default_value_t = false)]
    in_memory: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_runtime_config(&cli.serve)?;

    if let Some(Command::Db(DbCommand::Migrate)) = cli.command {
        connect_postgres(&config).await?;
        info!("Database migrations applied successfully");
        return Ok(());
    }

    run_server(config, cli.serve.in_memory).await
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Arc<Config>> {
    let ConfigLoad {
        mut config,
        warnings,
    } = ConfigLoader::new()
        .with_config_path(args.config.clone())
        .load()
        .context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }
    for warning in &warnings {
        match &warning.hint {
            Some(hint) => warn!(message = %warning.message, hint = %hint, "configuration warning"),
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    Ok(Arc::new(config))
}

async fn run_server(config: Arc<Config>, in_memory: bool) -> anyhow::Result<()> {
    let games: Arc<dyn GameRepository> = if in_memory {
        warn!("running with an in-memory catalog; data is lost on shutdown");
        Arc::new(InMemoryGameRepository::new())
    } else {
        Arc::new(connect_postgres(&config).await?.games())
    };

    let state = build_state(Arc::clone(&config), games)?;
    let app = create_app(state);

    let host = config.server.host.as_str();
    let port = config.server.port;
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    let addr: SocketAddr = listener.local_addr().context("listener has no local address")?;
    info!("Starting Gamevault on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
