use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;

    let app = build_router(Arc::new(AppState::default()), settings.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|error| {
        error!(%addr, %error, "failed to bind listening socket");
        error
    })?;
    info!(%addr, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(api::healthz))
        .route("/numbers", get(api::list_numbers).post(api::apply_number))
        .route("/reset", post(api::reset))
        .route("/example", post(api::run_example))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(error) => {
            error!(%error, "failed to install ctrl-c handler; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
