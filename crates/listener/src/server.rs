//! Router construction and server lifecycle.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `POST /` | [`handlers::receive_webhook`] |
//! | `HEAD /` | [`handlers::verify_callback`] |
//! | `GET /health` | [`handlers::health_check`] |
//!
//! Every response carries an `X-Request-Id` header and every request runs
//! inside a `tower-http` trace span.

use std::net::SocketAddr;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{handlers, AppState};

/// Creates the router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::receive_webhook).head(handlers::verify_callback))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Adds an `X-Request-Id` header to every response.
async fn inject_request_id(mut req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Binds `addr` and serves until Ctrl+C or SIGTERM.
///
/// In-flight requests are drained before returning. Membership calls that
/// were already dispatched keep running on the runtime until it shuts down.
///
/// # Errors
///
/// Returns `std::io::Error` if the address cannot be bound or the accept
/// loop fails.
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Webhook listener bound");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Webhook listener stopped");
    Ok(())
}

/// Waits for Ctrl+C (SIGINT) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, shutting down");
        },
        () = terminate => {
            warn!("Received SIGTERM, shutting down");
        },
    }
}
