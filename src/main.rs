use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use broadcast_function::{config::Config, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    if config.media_targets().is_some() {
        info!("Video attachment enabled");
    } else {
        info!("Media collections not configured, video attachment disabled");
    }
    if config.function_key.is_none() {
        info!("BROADCAST_FUNCTION_KEY not set, requests are not key-checked");
    }

    let state = AppState::new(config)?;
    info!("Platform endpoint: {}", state.platform.endpoint());

    let app = routes::router(state);

    info!("broadcast function listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
