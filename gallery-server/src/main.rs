//! gallery-server binary

use std::net::SocketAddr;

use gallery_server::{AppState, Config, api, logger};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(&config.log_level, config.log_dir.as_deref());

    tracing::info!("Starting gallery-server (env: {})", config.environment);
    for name in config.placeholder_secrets() {
        if name == "ADMIN_PASSWORD_HASH" {
            tracing::warn!(
                "ADMIN_PASSWORD_HASH is not set; admin login will fail until it holds an Argon2 hash"
            );
        } else {
            tracing::warn!("{name} is not set; using a development placeholder");
        }
    }

    let state = AppState::new(&config).await?;
    let app = api::build_app(state.clone());

    // Periodic cleanup: rate limiter windows and expired revocations (every 5 minutes)
    let rate_limiter = state.rate_limiter.clone();
    let jwt = state.jwt.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
            jwt.purge_revoked();
        }
    });

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("gallery-server HTTP listening on {http_addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("gallery-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
