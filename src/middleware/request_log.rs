use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::config::ApiConfig;

const REDACTED_HEADERS: [HeaderName; 3] = [
    header::AUTHORIZATION,
    header::COOKIE,
    HeaderName::from_static("x-cisco-meraki-api-key"),
];

/// Logs every request and its response status. Never alters either.
pub async fn log_requests(State(settings): State<ApiConfig>, request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    tracing::info!(%request_id, "Request {} {}", method, uri);
    if settings.log_headers {
        tracing::info!(%request_id, "Headers: {}", describe_headers(request.headers()));
    }

    let response = next.run(request).await;

    tracing::info!(
        %request_id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Response status: {} ({} {})",
        response.status().as_u16(),
        method,
        uri.path()
    );
    response
}

/// `name: value` pairs with credentials masked.
pub fn describe_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if REDACTED_HEADERS.contains(name) {
                "<redacted>"
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            format!("{}: {}", name, shown)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
