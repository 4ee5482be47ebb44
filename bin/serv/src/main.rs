use anyhow::Context;
use lp_api::{config::ApiConfig, state::ApiState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from .env and the environment
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env().context("invalid configuration")?;

    lp_api::tracing::init_tracing(config.env)?;

    // A store that cannot be opened is fatal
    let pool = lp_db::create_pool(&config.database_url, config.db_max_connections).await?;
    lp_db::ensure_db_and_migrate(&config.database_url, &pool).await?;
    tracing::info!(database_url = %config.database_url, "Database ready");

    if let Some(seed_dir) = &config.seed_dir {
        if lp_db::seed::is_unseeded(&pool).await? {
            let report = lp_db::seed::seed_from_dir(&pool, seed_dir)
                .await
                .with_context(|| format!("failed to seed from {}", seed_dir.display()))?;
            tracing::info!(rows = report.total(), "Seed data loaded");
        } else {
            tracing::info!("Database already holds data, skipping seed");
        }
    }

    let metrics_handle = lp_api::metrics::init_metrics()?;

    let app = lp_api::router::app(ApiState::new(pool.clone()), &config, metrics_handle);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, environment = ?config.env, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Keep serving rather than exiting immediately
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
