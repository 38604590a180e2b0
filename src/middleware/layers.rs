//! Built-in middleware backed by tower-http layers.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use super::Middleware;

/// Give every request an `x-request-id` (UUID v4 unless the client sent one)
/// and echo it on the response.
pub fn request_id() -> Middleware {
    let propagate = Middleware::layer(PropagateRequestIdLayer::x_request_id());
    let set = Middleware::layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
    Middleware::new(move |next| set.apply(propagate.apply(next)))
}

/// Respond `408 Request Timeout` when the wrapped handler runs longer than
/// `duration`.
pub fn timeout(duration: Duration) -> Middleware {
    Middleware::layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, duration))
}

/// Set `name: value` on every response, replacing any existing value.
pub fn set_response_header(name: HeaderName, value: HeaderValue) -> Middleware {
    Middleware::layer(SetResponseHeaderLayer::overriding(name, value))
}
