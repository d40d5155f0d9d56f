use taste_tests::shell::{config::Config, http::router, state::AppState};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load()?;
    let state = AppState::from_config(&config)?;
    let app = router(state);

    tracing::info!("HTTP API on http://{}, GraphQL at /gql", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
