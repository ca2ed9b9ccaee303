use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use user_registry::{
    build_app,
    infrastructure::{config::load_config, logger::Logger},
    AppState, UserStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config()?;
    config.validate()?;

    Logger::init(&config.logging)?;
    match source {
        Some(path) => info!(path = %path.display(), "loaded config file"),
        None => info!("no config file found, using defaults"),
    }

    let state = AppState::new(UserStore::new());
    let app = build_app(state, &config.http);

    let addr = config.http.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("🚀 user registry listening on http://{}", addr);
    info!("   GET    /health");
    info!("   GET    /users");
    info!("   POST   /users");
    info!("   GET    /users/:id");
    info!("   PUT    /users/:id");
    info!("   DELETE /users/:id");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
