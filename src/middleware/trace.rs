//! Per-request access logging.

use std::time::Instant;

use axum::body::Body;
use axum::http::Request;

use super::Middleware;
use crate::handler::Handler;

/// Emit one structured `tracing` event per request once the wrapped handler
/// has produced its response.
pub fn trace() -> Middleware {
    Middleware::from_fn(|req: Request<Body>, next: Handler| async move {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let response = next.run(req).await;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis() as u64;
        if status.is_server_error() {
            tracing::warn!(method = %method, path = %path, status = status.as_u16(), latency_ms, "Request failed");
        } else {
            tracing::info!(method = %method, path = %path, status = status.as_u16(), latency_ms, "Request handled");
        }
        response
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_trace_passes_response_through() {
        let h = trace().apply(Handler::new(|_req: Request<Body>| async {
            (StatusCode::CREATED, "made")
        }));
        let res = h.run(Request::builder().uri("/things").body(Body::empty()).unwrap()).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }
}
