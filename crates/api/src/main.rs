use std::sync::Arc;

use anyhow::Context;

use tellerdesk_api::app::services::AppServices;
use tellerdesk_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tellerdesk_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = Arc::new(AppServices::seeded(&config.jwt_secret)?);
    let app = tellerdesk_api::app::build_app(services);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
