//! Middleware: handler-to-handler transformations.
//!
//! # Wrap order
//! Applying `[m1, m2, m3]` to a handler `h` yields `m3(m2(m1(h)))`. Each
//! later middleware wraps the result of the earlier ones, so on a request
//! m3's pre-logic runs first and its post-logic runs last:
//!
//! ```text
//! m3 pre → m2 pre → m1 pre → h → m1 post → m2 post → m3 post
//! ```
//!
//! The same rule holds at every level: route middleware wraps the endpoint,
//! group middleware wraps the routes it contains, and router middleware wraps
//! everything.

mod layers;
mod trace;

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::IntoResponse;
use tower::{Layer, Service};

use crate::handler::Handler;

pub use layers::{request_id, set_response_header, timeout};
pub use trace::trace;

type WrapFn = dyn Fn(Handler) -> Handler + Send + Sync;

/// A transformation from one handler to another.
#[derive(Clone)]
pub struct Middleware {
    inner: Arc<WrapFn>,
}

impl Middleware {
    /// Build middleware from a raw `Handler -> Handler` function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Build middleware from an async function receiving the request and the
    /// wrapped handler.
    ///
    /// ```
    /// use route_compose::Middleware;
    /// use axum::http::Request;
    /// use axum::body::Body;
    ///
    /// let mw = Middleware::from_fn(|req: Request<Body>, next: route_compose::Handler| async move {
    ///     let mut res = next.run(req).await;
    ///     res.headers_mut().insert("x-served-by", "route-compose".parse().unwrap());
    ///     res
    /// });
    /// # let _ = mw;
    /// ```
    pub fn from_fn<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>, Handler) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        let f = Arc::new(f);
        Self::new(move |next| {
            let f = Arc::clone(&f);
            Handler::new(move |req| (*f)(req, next.clone()))
        })
    }

    /// Adapt a `tower::Layer` whose services never fail.
    pub fn layer<L, S, R>(layer: L) -> Self
    where
        L: Layer<Handler, Service = S> + Send + Sync + 'static,
        S: Service<Request<Body>, Response = R, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Future: Send + 'static,
        R: IntoResponse,
    {
        Self::new(move |next| Handler::from_service(layer.layer(next)))
    }

    /// Wrap a handler with this middleware.
    pub fn apply(&self, handler: Handler) -> Handler {
        (self.inner)(handler)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}

/// Apply middleware in declaration order, each one wrapping the previous
/// result.
pub fn apply_all<'a, I>(handler: Handler, middleware: I) -> Handler
where
    I: IntoIterator<Item = &'a Middleware>,
{
    middleware.into_iter().fold(handler, |h, m| m.apply(h))
}
