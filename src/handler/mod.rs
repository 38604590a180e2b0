//! Request handlers.
//!
//! # Responsibilities
//! - Erase every accepted handler shape into one clonable [`Handler`]
//! - Expose [`Handler`] as an infallible `tower::Service`
//! - Enumerate the accepted handler capabilities ([`Endpoint`])
//!
//! # Design Decisions
//! - Handlers are `Arc`-backed so wrapping and cloning never copy state
//! - Handler futures are boxed; composition happens once at startup and the
//!   per-request cost is a single allocation per layer
//! - Errors are folded into responses: a handler always yields a `Response`

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use tower::{Service, ServiceExt};

/// A boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type HandlerFn = dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync;

/// A type-erased asynchronous request handler.
#[derive(Clone)]
pub struct Handler {
    inner: Arc<HandlerFn>,
}

impl Handler {
    /// Build a handler from an async function of the request.
    pub fn new<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self {
            inner: Arc::new(move |req: Request<Body>| -> BoxFuture<'static, Response> {
                let fut = f(req);
                Box::pin(async move { fut.await.into_response() })
            }),
        }
    }

    /// Build a handler from an infallible `tower::Service`.
    ///
    /// The service is cloned per request and driven with `oneshot`, so
    /// readiness is always awaited before the call.
    pub fn from_service<S, R>(service: S) -> Self
    where
        S: Service<Request<Body>, Response = R, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Future: Send + 'static,
        R: IntoResponse,
    {
        Self::new(move |req| {
            let svc = service.clone();
            async move {
                match svc.oneshot(req).await {
                    Ok(res) => res.into_response(),
                    Err(never) => match never {},
                }
            }
        })
    }

    /// Run the handler for one request.
    pub fn run(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        (self.inner)(req)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

impl Service<Request<Body>> for Handler {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let fut = self.run(req);
        Box::pin(async move { Ok(fut.await) })
    }
}

/// The handler capabilities accepted by [`crate::handle`].
///
/// Anything else is rejected by the compiler, there is no runtime
/// "unknown handler type" path.
#[derive(Clone, Debug)]
pub enum Endpoint {
    /// An object that serves requests (any infallible `tower::Service`).
    Service(Handler),
    /// A plain async request function.
    Function(Handler),
}

impl Endpoint {
    /// Accept a serve-capable object.
    pub fn service<S, R>(service: S) -> Self
    where
        S: Service<Request<Body>, Response = R, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Future: Send + 'static,
        R: IntoResponse,
    {
        Endpoint::Service(Handler::from_service(service))
    }

    /// Accept a plain async request function.
    pub fn function<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Endpoint::Function(Handler::new(f))
    }

    /// Short name of the capability, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Endpoint::Service(_) => "service",
            Endpoint::Function(_) => "function",
        }
    }

    pub fn into_handler(self) -> Handler {
        match self {
            Endpoint::Service(h) | Endpoint::Function(h) => h,
        }
    }
}

impl From<Handler> for Endpoint {
    fn from(handler: Handler) -> Self {
        Endpoint::Function(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn body_string(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_function_handler() {
        let h = Handler::new(|req: Request<Body>| async move { req.uri().path().to_string() });
        let res = h.run(Request::builder().uri("/hello").body(Body::empty()).unwrap()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res).await, "/hello");
    }

    #[tokio::test]
    async fn test_service_endpoint() {
        let svc = tower::service_fn(|_req: Request<Body>| async {
            Ok::<_, Infallible>((StatusCode::ACCEPTED, "served"))
        });
        let endpoint = Endpoint::service(svc);
        assert_eq!(endpoint.kind(), "service");

        let res = endpoint
            .into_handler()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_eq!(body_string(res).await, "served");
    }

    #[test]
    fn test_handler_converts_to_function_endpoint() {
        let h = Handler::new(|_req: Request<Body>| async { "ok" });
        assert_eq!(Endpoint::from(h).kind(), "function");
    }
}
