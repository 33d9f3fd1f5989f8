//! RetailBot API server binary.
//!
//! Capability selection happens here, once, at startup: a configured
//! `OPENAI_API_KEY` enables AI-augmented replies, a reachable `DATABASE_URL`
//! enables persistent history. Missing either degrades gracefully to the
//! keyword fallback / in-memory store.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use retailbot_api::config::ApiConfig;
use retailbot_core::generator::ResponseGenerator;
use retailbot_core::history::HistoryStore;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "retailbot_server", about = "RetailBot API server")]
struct Args {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    bind_addr: String,

    /// PostgreSQL connection URL. Unset runs with in-memory history only.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,retailbot_api=debug,retailbot_core=debug"
                    .parse()
                    .unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    config.bind_addr = args.bind_addr;
    config.database_url = args.database_url.filter(|v| !v.is_empty());

    let store = match config.database_url.as_deref() {
        Some(url) => match connect_store(url, args.max_connections).await {
            Ok(store) => store,
            Err(e) => {
                warn!("database unavailable, falling back to in-memory history: {e}");
                HistoryStore::in_memory()
            }
        },
        None => {
            info!("no DATABASE_URL configured, using in-memory history");
            HistoryStore::in_memory()
        }
    };

    let generator = ResponseGenerator::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    );

    info!(
        ai_enabled = generator.ai_enabled(),
        persistent = store.is_persistent(),
        "starting retailbot_server"
    );

    let state = retailbot_api::AppState {
        store: Arc::new(store),
        generator: Arc::new(generator),
        config: config.clone(),
    };

    let app = retailbot_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Connect a pool and run the embedded migrations. Any failure here makes the
/// caller degrade to the in-memory store.
async fn connect_store(
    url: &str,
    max_connections: u32,
) -> Result<HistoryStore, Box<dyn std::error::Error>> {
    info!(max_connections, "connecting to PostgreSQL");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(url)
        .await?;

    info!("running database migrations");
    retailbot_api::migrate(&pool).await?;

    Ok(HistoryStore::postgres(pool))
}
