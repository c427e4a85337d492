//! Request logging.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::Level;
use std::time::Instant;

/// Logs method, path, response status and duration for every request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    let code = response.status();
    let (level, status) = if code.is_server_error() {
        (Level::Error, "error")
    } else if code.is_client_error() {
        (Level::Warn, "error")
    } else {
        (Level::Info, "ok")
    };
    log::log!(
        level,
        "event=http_request module=api status={status} method={method} path={path} code={} duration_ms={}",
        code.as_u16(),
        started.elapsed().as_millis()
    );
    response
}
