//! HTTP surface for LabTrack.
//!
//! # Responsibility
//! - Map REST requests under `/api` onto `labtrack_core` services.
//! - Authenticate bearer tokens and enforce role permissions.
//! - Translate service errors into JSON error envelopes.
//!
//! # Invariants
//! - Every route except health, register, login and token refresh requires
//!   a valid access token.
//! - One SQLite connection is shared behind a mutex; service calls run on
//!   the blocking pool and hold the lock only for one call.
//! - Every error response, including extractor rejections, is a JSON
//!   envelope.

pub mod auth;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::{ApiConfig, AppContext, AppState};

use log::info;
use std::net::SocketAddr;

/// Binds `addr` and serves the router until Ctrl+C or SIGTERM.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("event=server_start module=api status=ok addr={addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("event=shutdown module=api status=ok signal=ctrl_c"),
        () = terminate => info!("event=shutdown module=api status=ok signal=sigterm"),
    }
}
