use std::net::SocketAddr;

use anyhow::Context;
use mimalloc::MiMalloc;
use nurstem::config::AppConfig;
use nurstem::{db, routes, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nurstem=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().context("DATABASE_URL must be set")?;

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("connecting to the database")?;
    db::migrate(&pool).await.context("applying migrations")?;

    let host: std::net::IpAddr = config
        .host
        .parse()
        .with_context(|| format!("invalid BACKEND_HOST '{}'", config.host))?;
    let addr = SocketAddr::from((host, config.port));

    if config.default_acting_staff_id.is_none() {
        tracing::warn!("DEFAULT_ACTING_STAFF_ID not set, point-of-care writes require X-Acting-Staff");
    }
    tracing::info!(host = %addr, "Starting Nurstem API server");

    let app = routes::router(AppState { db: pool, config });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
