use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Logs one line per request. Health-check endpoints are logged at debug level and
/// failed requests at warn.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let is_health_check = matches!(uri.path(), "/health" | "/ready");

    if response.status().is_client_error() || response.status().is_server_error() {
        warn!(%method, %uri, status, duration_ms, "Request failed");
    } else if is_health_check {
        debug!(%method, %uri, status, duration_ms, "Request completed");
    } else {
        info!(%method, %uri, status, duration_ms, "Request completed");
    }

    response
}
