//! Task list server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::net::SocketAddr;
use tasklist_core::AppConfig;
use tasklist_server::bootstrap::ensure_default_user;
use tasklist_server::{AppState, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Tasklist - a single-user task tracking service
#[derive(Parser, Debug)]
#[command(name = "tasklistd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "TASKLIST_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Tasklist v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration. The file is optional; every section has defaults
    // and env vars can override anything.
    let mut figment = Figment::new();
    if std::path::Path::new(&args.config).exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("TASKLIST_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // Initialize storage backend
    let storage = tasklist_storage::from_config(&config.storage)
        .context("failed to initialize storage")?;

    // Initialize metadata store
    let metadata = tasklist_metadata::from_config(&config.metadata)
        .await
        .context("failed to initialize metadata store")?;

    // Seed the single user and default list, resolving the working user id
    let user_id = ensure_default_user(metadata.as_ref(), &config.user)
        .await
        .context("failed to seed default user")?;

    let bind = config.server.bind.clone();
    let state = AppState::new(config, storage, metadata, user_id);
    let app = create_router(state);

    let addr: SocketAddr = bind.parse().context("invalid bind address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
