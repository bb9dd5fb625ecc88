// ABOUTME: SaveVault server bootstrap
// ABOUTME: Wires tracing, the JSON-backed tag store and the HTTP router together

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::Router;
use savevault_api::TagCommands;
use savevault_config::constants;
use savevault_tags::{JsonFilePersistence, TagStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;

use config::Config;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(constants::RUST_LOG)
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_FILTER));

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Open the tag store backed by `tags.json` in `data_dir`
pub async fn open_commands(data_dir: &Path) -> anyhow::Result<TagCommands> {
    let persistence = JsonFilePersistence::in_dir(data_dir);
    let db_path = persistence.path().to_path_buf();
    let store = TagStore::open(Arc::new(persistence))
        .await
        .with_context(|| format!("Failed to open tags database at {}", db_path.display()))?;

    Ok(TagCommands::new(Arc::new(store)))
}

/// Build the full application router with CORS and request tracing
pub fn build_app(commands: TagCommands, config: &Config) -> anyhow::Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(savevault_api::create_router(commands)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let commands = open_commands(&config.data_dir).await?;
    let app = build_app(commands, &config)?;

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Tags database: {}", config.tags_db_file().display());
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        Config {
            host: "127.0.0.1".parse().unwrap(),
            port: 4010,
            cors_origin: "http://localhost:5173".to_string(),
            data_dir: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn test_init_tracing_is_repeatable() {
        init_tracing();
        init_tracing();
        tracing::info!("tracing installed");
    }

    #[tokio::test]
    async fn test_open_commands_creates_database_on_first_write() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let commands = open_commands(&config.data_dir).await.unwrap();
        assert!(!config.tags_db_file().exists());

        commands.create_tag("Important", "#EF4444").await.unwrap();
        assert!(config.tags_db_file().exists());
    }

    #[tokio::test]
    async fn test_open_commands_rejects_corrupt_database() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::write(config.tags_db_file(), "{").unwrap();

        assert!(open_commands(&config.data_dir).await.is_err());
    }

    #[tokio::test]
    async fn test_build_app_rejects_bad_cors_origin() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        let commands = open_commands(&config.data_dir).await.unwrap();

        config.cors_origin = "bad\norigin".to_string();
        assert!(build_app(commands, &config).is_err());
    }
}
