use hobbyhub::{routes, AppResult, Config};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let app = routes::router(config.mode)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        "serving {} pages on http://{}{}/ (api at {})",
        config.mode,
        config.bind_addr,
        config.mode.base_path(),
        config.api_base,
    );
    axum::serve(listener, app).await?;
    Ok(())
}
