use std::time::Instant;

use axum::{middleware::Next, response::Response};
use tracing::info;

/// Log one line per request with method, path, status and latency.
pub async fn request_log(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    info!(
        %method,
        path = %path,
        status = res.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    res
}
