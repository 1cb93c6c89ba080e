//! Server binary: load settings, prepare the store, mount routes, serve.

use inkpress::{app, connect, ensure_schema, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("inkpress=info".parse()?))
        .init();

    let config = Config::from_env();
    let pool = connect(&config.database_url).await?;
    ensure_schema(&pool).await?;

    let state = AppState::new(pool)?;
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
