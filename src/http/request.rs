//! Request inspection helpers.

use axum::body::Body;
use axum::http::{header, Request};

/// The host the client addressed: the `Host` header, falling back to the
/// authority of an absolute request URI. Empty when neither is present.
pub fn request_host(req: &Request<Body>) -> &str {
    req.headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()))
        .unwrap_or("")
}
