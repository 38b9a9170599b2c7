use tracing_subscriber::EnvFilter;

use module_browser::api;
use module_browser::config::Config;
use module_browser::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Module index: {} (index '{}', type '{}')",
        config.index.base_url(),
        config.index.name,
        config.index.doc_type
    );

    let state = AppState::new(&config)?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
