//! The registration service: `POST /register` issues a pass id for each accepted attendee.

mod handlers;

pub use handlers::{ApiError, ErrorBody, MISSING_FIELDS_MESSAGE};

use crate::domain::RegistrationStore;
use crate::utils::error::Result;
use crate::utils::validation::validate_socket_addr;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub(crate) store: Arc<dyn RegistrationStore>,
}

pub fn router(store: Arc<dyn RegistrationStore>) -> Router {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/health", get(handlers::health))
        .with_state(AppState { store })
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(addr: &str, store: Arc<dyn RegistrationStore>) -> Result<()> {
    let addr = validate_socket_addr("server.bind", addr)?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Registration service listening on {}", listener.local_addr()?);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Registration service stopped");
    Ok(())
}

/// Serves on an already bound listener with no shutdown hook. Used by tests and embedders.
pub async fn serve_listener(listener: TcpListener, store: Arc<dyn RegistrationStore>) -> Result<()> {
    axum::serve(listener, router(store)).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
