use anyhow::Context;
use dotenvy::dotenv;
use escola::config::AppConfig;
use escola::logging::init_tracing;
use escola::metrics::{init_metrics, metrics_app};
use escola::router::init_router;
use escola::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging).context("Failed to initialize logging")?;

    if config.jwt.uses_development_secret() {
        tracing::warn!("SECRET_KEY not set; signing tokens with the development secret");
    }

    let state = init_app_state(&config)
        .await
        .context("Failed to initialize storage")?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics().context("Failed to install metrics recorder")? {
        app = app.merge(metrics_app(handle));
    }

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!("Server running on http://{}", address);
    tracing::info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app).await?;
    Ok(())
}
