use std::sync::Arc;

use vitrine_api::config::AppConfig;
use vitrine_api::{build_router, AppState};
use vitrine_shared::SystemClock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vitrine_shared::middleware::init_tracing("vitrine-api");

    let config = AppConfig::load()?;
    let port = config.port;

    let metrics_handle = vitrine_shared::middleware::init_metrics()?;

    let state = Arc::new(AppState::build(config, Arc::new(SystemClock), metrics_handle)?);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "vitrine-api starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
