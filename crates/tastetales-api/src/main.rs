//! tastetales-api - HTTP API server for tastetales

use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tastetales_api::{app, AppState, SessionSigner};
use tastetales_store::Database;

/// Fallback session secret for local development only.
const DEV_SESSION_SECRET: &str = "dev-secret-change-me";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   RUST_LOG    - standard env filter (default: "tastetales_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tastetales_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Get configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "static".to_string());
    let upload_dir =
        std::env::var("UPLOAD_DIR").unwrap_or_else(|_| format!("{data_dir}/uploads"));
    let secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
        warn!("SESSION_SECRET not set, using development default");
        DEV_SESSION_SECRET.to_string()
    });

    let db = Database::open(&data_dir);
    info!(%data_dir, %upload_dir, "store initialized");

    let state = AppState::new(db, SessionSigner::new(secret), upload_dir);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
