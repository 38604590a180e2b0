//! Routes and flat route collections.

use std::fmt;

use crate::error::ConfigError;
use crate::handler::{Endpoint, Handler};
use crate::middleware::{apply_all, Middleware};
use crate::mux::{Multiplexer, ServeMux};

/// A URL pattern bound to a fully wrapped handler.
#[derive(Clone)]
pub struct Route {
    pattern: String,
    handler: Handler,
}

/// Declare an endpoint.
///
/// The endpoint is wrapped by `middleware` in order: `[m1, m2]` produces
/// `m2(m1(endpoint))`.
///
/// ```
/// use axum::body::Body;
/// use axum::http::Request;
/// use route_compose::{handle, Endpoint, Middleware};
///
/// let route = handle(
///     "/x",
///     Endpoint::function(|_req: Request<Body>| async { "ok" }),
///     Vec::<Middleware>::new(),
/// )
/// .unwrap();
/// assert_eq!(route.pattern(), "/x");
/// ```
///
/// Only [`Endpoint`] values (or things converting into one) are accepted:
///
/// ```compile_fail
/// use route_compose::{handle, Middleware};
///
/// let _ = handle("/x", "not a handler", Vec::<Middleware>::new());
/// ```
pub fn handle<P, E, I>(pattern: P, endpoint: E, middleware: I) -> Result<Route, ConfigError>
where
    P: Into<String>,
    E: Into<Endpoint>,
    I: IntoIterator<Item = Middleware>,
{
    let pattern = pattern.into();
    validate_pattern(&pattern)?;

    let endpoint = endpoint.into();
    tracing::trace!(pattern = %pattern, kind = endpoint.kind(), "Route declared");

    let route = Route {
        pattern,
        handler: endpoint.into_handler(),
    };
    Ok(route.wrap(middleware))
}

fn validate_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::EmptyPattern);
    }
    if !pattern.contains('/') {
        return Err(ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

impl Route {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn into_parts(self) -> (String, Handler) {
        (self.pattern, self.handler)
    }

    /// Wrap the route's handler with more middleware. The new middleware
    /// runs outside the existing wrapping.
    #[must_use]
    pub fn wrap<I>(self, middleware: I) -> Self
    where
        I: IntoIterator<Item = Middleware>,
    {
        let middleware: Vec<Middleware> = middleware.into_iter().collect();
        self.wrap_with(&middleware)
    }

    pub(crate) fn wrap_with(mut self, middleware: &[Middleware]) -> Self {
        self.handler = apply_all(self.handler, middleware);
        self
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route").field("pattern", &self.pattern).finish_non_exhaustive()
    }
}

/// An ordered, already flat list of routes.
#[derive(Clone, Debug, Default)]
pub struct Routes(Vec<Route>);

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.0.iter()
    }

    /// Patterns in order, mostly useful for inspection and tests.
    pub fn patterns(&self) -> Vec<&str> {
        self.0.iter().map(Route::pattern).collect()
    }

    /// Wrap every route with the given middleware.
    #[must_use]
    pub fn wrap<I>(self, middleware: I) -> Self
    where
        I: IntoIterator<Item = Middleware>,
    {
        let middleware: Vec<Middleware> = middleware.into_iter().collect();
        self.wrap_with(&middleware)
    }

    pub(crate) fn wrap_with(self, middleware: &[Middleware]) -> Self {
        if middleware.is_empty() {
            return self;
        }
        self.0.into_iter().map(|r| r.wrap_with(middleware)).collect()
    }

    /// Register every route with `mux`, in order.
    pub fn register<M: Multiplexer>(self, mux: &mut M) {
        for (pattern, handler) in self.0.into_iter().map(Route::into_parts) {
            tracing::debug!(pattern = %pattern, "Registering route");
            mux.register_handler(&pattern, handler);
        }
    }

    /// Register every route with a fresh [`ServeMux`].
    pub fn serve(self) -> ServeMux {
        let mut mux = ServeMux::new();
        self.register(&mut mux);
        mux
    }
}

impl From<Vec<Route>> for Routes {
    fn from(routes: Vec<Route>) -> Self {
        Self(routes)
    }
}

impl From<Route> for Routes {
    fn from(route: Route) -> Self {
        Self(vec![route])
    }
}

impl FromIterator<Route> for Routes {
    fn from_iter<T: IntoIterator<Item = Route>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Route> for Routes {
    fn extend<T: IntoIterator<Item = Route>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Routes {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Routes {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
