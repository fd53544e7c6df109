//! Request/response logging middleware with sensitive data redaction

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Middleware to log HTTP requests and responses with sensitive data redaction.
/// Note: This middleware does NOT create its own tracing span since `TraceLayer`
/// from tower-http already handles span creation. Creating duplicate spans
/// causes panics in the tracing registry.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let request_id = extract_request_id(&request);

    let headers_log = redact_headers(&request);

    info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        headers = %headers_log,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}

fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Redact sensitive headers for logging
fn redact_headers(request: &Request<Body>) -> String {
    let mut parts = Vec::new();

    for (name, value) in request.headers() {
        let name_str = name.as_str().to_lowercase();
        let value_str = if is_sensitive_header(&name_str) {
            "[REDACTED]".to_string()
        } else {
            value.to_str().unwrap_or("[invalid]").to_string()
        };

        // Only log relevant headers
        if should_log_header(&name_str) {
            parts.push(format!("{}={}", name_str, value_str));
        }
    }

    parts.join(", ")
}

/// Check if a header contains sensitive information
fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name,
        "authorization"
            | "x-admin-token"
            | "cookie"
            | "set-cookie"
            | "proxy-authorization"
    )
}

/// Check if a header should be logged
fn should_log_header(name: &str) -> bool {
    matches!(
        name,
        "content-type"
            | "content-length"
            | "accept"
            | "user-agent"
            | "x-request-id"
            | "x-forwarded-for"
            | "x-real-ip"
            | "authorization"
            | "x-admin-token"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sensitive_header() {
        assert!(is_sensitive_header("authorization"));
        assert!(is_sensitive_header("x-admin-token"));
        assert!(is_sensitive_header("cookie"));
        assert!(!is_sensitive_header("content-type"));
        assert!(!is_sensitive_header("accept"));
    }

    #[test]
    fn test_should_log_header() {
        assert!(should_log_header("content-type"));
        assert!(should_log_header("authorization"));
        assert!(should_log_header("user-agent"));
        assert!(!should_log_header("cache-control"));
        assert!(!should_log_header("etag"));
    }

    #[test]
    fn test_redact_headers() {
        let request = Request::builder()
            .header("Authorization", "Bearer secret-admin-token")
            .header("Content-Type", "application/json")
            .body(Body::empty())
            .unwrap();

        let logged = redact_headers(&request);
        assert!(logged.contains("authorization=[REDACTED]"));
        assert!(logged.contains("content-type=application/json"));
        assert!(!logged.contains("secret-admin-token"));
    }
}
