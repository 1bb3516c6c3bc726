use std::sync::Arc;

use anyhow::Context;

use dsd_api::app::{build_app, services::AppServices};
use dsd_infra::{AppConfig, ai::completion_client_from_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dsd_observability::init();

    let cfg = AppConfig::from_env().context("loading configuration")?;
    tracing::info!(config = ?cfg, "configuration loaded");

    let client = completion_client_from_config(&cfg.ai)?;
    let services = AppServices::seeded(client, cfg.ai.timeout).context("seeding demo data")?;
    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
