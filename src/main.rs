use anyhow::Context;
use bims::logging::init_tracing;
use bims::metrics::init_metrics;
use bims::router::init_router;
use bims::state::init_app_state;
use bims_config::ServerConfig;
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server_config = ServerConfig::from_env()?;
    let state = init_app_state().await?.with_metrics(init_metrics());
    let app = init_router(state);

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        env = ?server_config.app_env,
        "Server running, Swagger UI at /swagger-ui"
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
