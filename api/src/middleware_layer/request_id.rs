use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{debug, warn};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

fn incoming_request_id(req: &Request<Body>) -> Option<String> {
    let v = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let v = v.trim();
    (!v.is_empty()).then(|| v.to_string())
}

fn generate_request_id() -> String {
    let now = Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros() * 1000);
    format!("req-{nanos}")
}

/// Echo the caller's `X-Request-Id` on the response, or mint one.
pub async fn request_id(req: Request<Body>, next: Next) -> Response {
    let id = incoming_request_id(&req).unwrap_or_else(generate_request_id);
    debug!(request_id = %id, method = %req.method(), uri = %req.uri(), "request");

    let mut res = next.run(req).await;

    match HeaderValue::from_str(&id) {
        Ok(v) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, v);
        }
        Err(_) => warn!(request_id = %id, "request id is not a valid header value"),
    }
    res
}
