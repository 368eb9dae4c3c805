use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stackly_auth::{AppState, Config, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    if config.demo_admin_enabled {
        tracing::warn!("⚠️ Demo admin login is enabled; do not expose this server");
    }

    let state = AppState::new(&config)?;
    let app = routes::router(state);

    tracing::info!("🚀 Server listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
