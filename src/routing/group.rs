//! Route groups with scoped middleware.

use crate::middleware::Middleware;
use crate::routing::route::{Route, Routes};

/// Anything a [`Group`] or [`crate::Router`] accepts.
///
/// Endpoints only enter the tree through [`crate::handle`]: there is no
/// conversion from a bare pattern or handler function.
///
/// ```
/// use axum::body::Body;
/// use axum::http::Request;
/// use route_compose::{handle, Endpoint, Group, Middleware, Router};
///
/// let route = handle(
///     "/x",
///     Endpoint::function(|_req: Request<Body>| async { "ok" }),
///     Vec::<Middleware>::new(),
/// )
/// .unwrap();
/// let _ = Router::new().add(Group::new().add(route));
/// ```
///
/// A raw pattern is rejected:
///
/// ```compile_fail
/// use route_compose::Group;
///
/// let _ = Group::new().add("/x");
/// ```
///
/// So is a handler that was not declared with a pattern:
///
/// ```compile_fail
/// use axum::body::Body;
/// use axum::http::Request;
/// use route_compose::{Handler, Router};
///
/// let h = Handler::new(|_req: Request<Body>| async { "ok" });
/// let _ = Router::new().add(h);
/// ```
#[derive(Clone, Debug)]
pub enum Member {
    Group(Group),
    Groups(Vec<Group>),
    Route(Route),
    Routes(Routes),
}

impl From<Group> for Member {
    fn from(group: Group) -> Self {
        Member::Group(group)
    }
}

impl From<Vec<Group>> for Member {
    fn from(groups: Vec<Group>) -> Self {
        Member::Groups(groups)
    }
}

impl From<Route> for Member {
    fn from(route: Route) -> Self {
        Member::Route(route)
    }
}

impl From<Routes> for Member {
    fn from(routes: Routes) -> Self {
        Member::Routes(routes)
    }
}

impl From<Vec<Route>> for Member {
    fn from(routes: Vec<Route>) -> Self {
        Member::Routes(routes.into())
    }
}

/// Sub-groups and direct routes, shared by groups and the router.
#[derive(Clone, Debug, Default)]
pub(crate) struct Members {
    groups: Vec<Group>,
    routes: Vec<Route>,
}

impl Members {
    pub(crate) fn push(&mut self, member: Member) {
        match member {
            Member::Group(g) => self.groups.push(g),
            Member::Groups(gs) => self.groups.extend(gs),
            Member::Route(r) => self.routes.push(r),
            Member::Routes(rs) => self.routes.extend(rs),
        }
    }

    /// Direct routes followed by every sub-group's composition, in
    /// declaration order.
    pub(crate) fn flatten(&self) -> Routes {
        let mut routes: Routes = self.routes.iter().cloned().collect();
        for group in &self.groups {
            routes.extend(group.compose());
        }
        routes
    }
}

/// A set of routes and sub-groups sharing middleware.
#[derive(Clone, Debug, Default)]
pub struct Group {
    members: Members,
    middleware: Vec<Middleware>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope middleware to everything this group contains.
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
    pub fn add_all<I, M>(self, members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Member>,
    {
        members.into_iter().fold(self, Group::add)
    }

    /// Flatten the group: its direct routes, then each sub-group's routes,
    /// all wrapped with this group's middleware outermost.
    pub fn compose(&self) -> Routes {
        self.members.flatten().wrap_with(&self.middleware)
    }
}
