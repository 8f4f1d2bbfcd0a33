use anyhow::{Context, Result};
use music_catalog::{config, email_check::EmailCheckClient, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("music_catalog=info".parse()?),
        )
        .init();

    info!("Starting music catalog message server");

    // Load configuration from environment
    let config = config::Config::from_env()?;

    // Build the locale service and check every enabled locale before serving
    let locales = config
        .locale_service()
        .context("Invalid locale configuration")?;
    locales
        .verify()
        .await
        .context("Message documents failed verification")?;

    info!(
        "Serving locales {:?} (default '{}')",
        locales
            .registry()
            .enabled()
            .iter()
            .map(|l| l.code())
            .collect::<Vec<_>>(),
        locales.registry().default_locale()
    );

    let http = reqwest::Client::builder()
        .user_agent(concat!("music-catalog/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    let email_check = EmailCheckClient::with_client(http, config.email_check_url.clone());
    info!("Forwarding email checks to {}", email_check.endpoint());

    let app = server::router(server::AppState::new(locales, email_check));
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
