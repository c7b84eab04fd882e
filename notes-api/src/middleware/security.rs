//! Security headers middleware
//!
//! Adds the OWASP-recommended response headers to every page:
//!
//! - `X-Content-Type-Options: nosniff`
//! - `X-Frame-Options: DENY`
//! - `Referrer-Policy: same-origin`
//! - `Content-Security-Policy` (pages are JSON, nothing may load)
//! - `Strict-Transport-Security` (production only)
//!
//! # Example
//!
//! ```no_run
//! use axum::{middleware, Router};
//! use notes_api::middleware::security::security_headers;
//!
//! let app: Router = Router::new()
//!     .layer(middleware::from_fn_with_state(true, security_headers));
//! ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Adds security headers; `enable_hsts` should be true behind HTTPS
pub async fn security_headers(
    State(enable_hsts): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );

    if enable_hsts {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn send(enable_hsts: bool) -> Response {
        let app = Router::new()
            .route("/test", get(|| async { "test" }))
            .layer(middleware::from_fn_with_state(enable_hsts, security_headers));

        app.oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_security_headers_applied() {
        let response = send(false).await;
        let headers = response.headers();

        assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
        assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
        assert_eq!(headers.get("Referrer-Policy").unwrap(), "same-origin");
        assert!(headers.get("Content-Security-Policy").is_some());
        assert!(headers.get("Strict-Transport-Security").is_none());
    }

    #[tokio::test]
    async fn test_hsts_enabled_in_production() {
        let response = send(true).await;

        assert!(response.headers().get("Strict-Transport-Security").is_some());
    }
}
