//! The root composite: flattens the whole tree into a dispatch table.
//!
//! # Responsibilities
//! - Hold top-level groups, routes and router-wide middleware
//! - Flatten groups and apply router middleware as the outermost layer
//! - Register every `(pattern, handler)` with the multiplexer
//!
//! # Design Decisions
//! - `compose` consumes the router; the table is built exactly once
//! - Duplicate patterns are left to the multiplexer (last registration wins
//!   for [`ServeMux`])

use std::fmt;

use crate::middleware::Middleware;
use crate::mux::{Multiplexer, ServeMux};
use crate::routing::group::{Member, Members};
use crate::routing::route::Routes;

/// Root of a route tree, bound to a multiplexer.
pub struct Router<M = ServeMux> {
    mux: M,
    members: Members,
    middleware: Vec<Middleware>,
}

impl Router<ServeMux> {
    /// A router that composes into a new, empty [`ServeMux`].
    pub fn new() -> Self {
        Self::with_mux(ServeMux::new())
    }
}

impl Default for Router<ServeMux> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Multiplexer> Router<M> {
    /// A router that composes into `mux`.
    pub fn with_mux(mux: M) -> Self {
        Self {
            mux,
            members: Members::default(),
            middleware: Vec::new(),
        }
    }

    /// Replace the multiplexer, keeping the declared tree.
    pub fn set_mux<N: Multiplexer>(self, mux: N) -> Router<N> {
        Router {
            mux,
            members: self.members,
            middleware: self.middleware,
        }
    }

    /// Add router-wide middleware. It runs before, and finishes after,
    /// everything contributed by groups and routes.
    #[must_use]
    pub fn wrap<I>(mut self, middleware: I) -> Self
    where
        I: IntoIterator<Item = Middleware>,
    {
        self.middleware.extend(middleware);
        self
    }

    #[must_use]
    pub fn add(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    #[must_use]
    pub fn add_all<I, T>(self, members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Member>,
    {
        members.into_iter().fold(self, Router::add)
    }

    /// The fully wrapped, flat route list that [`Router::compose`] registers.
    pub fn routes(&self) -> Routes {
        self.members.flatten().wrap_with(&self.middleware)
    }

    /// Flatten the tree and register every route with the multiplexer.
    pub fn compose(self) -> M {
        let routes = self.routes();
        let mut mux = self.mux;
        let count = routes.len();
        routes.register(&mut mux);
        tracing::info!(routes = count, middleware = self.middleware.len(), "Router composed");
        mux
    }

    /// Add `members`, then [`compose`](Router::compose).
    pub fn compose_with<I, T>(self, members: I) -> M
    where
        I: IntoIterator<Item = T>,
        T: Into<Member>,
    {
        self.add_all(members).compose()
    }
}

impl<M: fmt::Debug> fmt::Debug for Router<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("mux", &self.mux)
            .field("members", &self.members)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}
