// RichNotes - self-hosted note-taking service
// Entry point and application setup

use richnotes::app::AppState;
use richnotes::config::Config;
use richnotes::database::create_pool;
use richnotes::http;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "richnotes=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RichNotes service");

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let pool = create_pool(&config.database_path).await?;
    let state = AppState::new(pool);
    let app = http::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
