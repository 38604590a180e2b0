//! Request multiplexing: the dispatch table routes are registered into.
//!
//! # Responsibilities
//! - Define the [`Multiplexer`] registration contract
//! - Provide [`ServeMux`], a pattern table that dispatches requests
//!
//! # Matching rules ([`ServeMux`])
//! - A pattern without a trailing `/` matches that exact path only
//! - A pattern with a trailing `/` matches every path below it
//! - The longest matching pattern wins
//! - Patterns not starting with `/` are host-qualified (`example.com/`) and
//!   take precedence for requests to that host
//! - `/tree` redirects (301) to `/tree/` when only the latter is registered
//! - Non-canonical paths redirect (301) to their cleaned form
//! - Registering a pattern twice replaces the earlier handler
//!
//! # Design Decisions
//! - The table is behind an `Arc`: cloning the mux per request is cheap
//! - Registration happens before serving; `Arc::make_mut` only copies if a
//!   clone was already handed out

pub mod path;

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use tower::Service;

use crate::handler::{BoxFuture, Handler};
use crate::http::redirect::redirect_response;
use crate::http::request::request_host;
use self::path::{clean_path, strip_host_port};

/// Something that accepts `(pattern, handler)` registrations.
pub trait Multiplexer {
    fn register_handler(&mut self, pattern: &str, handler: Handler);
}

/// The default pattern-matching dispatch table.
#[derive(Clone, Default)]
pub struct ServeMux {
    table: Arc<Table>,
}

#[derive(Clone, Default)]
struct Table {
    entries: HashMap<String, Handler>,
    /// Patterns ending in '/', longest first.
    subtrees: Vec<String>,
    /// Whether any pattern is host-qualified.
    hosts: bool,
}

enum Resolution<'a> {
    Matched(&'a Handler),
    Redirect(String),
    NotFound,
}

impl Table {
    fn find(&self, path: &str) -> Option<&Handler> {
        if let Some(handler) = self.entries.get(path) {
            return Some(handler);
        }
        self.subtrees
            .iter()
            .find(|pattern| path.starts_with(pattern.as_str()))
            .and_then(|pattern| self.entries.get(pattern))
    }

    fn lookup(&self, host: &str, path: &str) -> Option<&Handler> {
        if self.hosts {
            if let Some(found) = self.find(&format!("{host}{path}")) {
                return Some(found);
            }
        }
        self.find(path)
    }

    fn should_add_slash(&self, host: &str, path: &str) -> bool {
        let candidates = [path.to_string(), format!("{host}{path}")];
        if candidates.iter().any(|c| self.entries.contains_key(c)) {
            return false;
        }
        if path.is_empty() || path.ends_with('/') {
            return false;
        }
        candidates
            .iter()
            .any(|c| self.entries.contains_key(&format!("{c}/")))
    }

    fn resolve(&self, host: &str, path: &str, query: Option<&str>) -> Resolution<'_> {
        let host = strip_host_port(host);
        let cleaned = clean_path(path);

        if self.should_add_slash(host, &cleaned) {
            return Resolution::Redirect(with_query(format!("{cleaned}/"), query));
        }
        if cleaned != path {
            return Resolution::Redirect(with_query(cleaned, query));
        }
        match self.lookup(host, path) {
            Some(handler) => Resolution::Matched(handler),
            None => Resolution::NotFound,
        }
    }
}

fn with_query(mut target: String, query: Option<&str>) -> String {
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(q);
    }
    target
}

fn not_found() -> Handler {
    Handler::new(|_req: Request<Body>| async { (StatusCode::NOT_FOUND, "404 page not found\n") })
}

impl ServeMux {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered patterns, sorted.
    pub fn patterns(&self) -> Vec<&str> {
        let mut patterns: Vec<&str> = self.table.entries.keys().map(String::as_str).collect();
        patterns.sort_unstable();
        patterns
    }

    pub fn len(&self) -> usize {
        self.table.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.entries.is_empty()
    }

    /// The handler for a request: the matched route, a redirect, or 404.
    pub fn handler_for(&self, req: &Request<Body>) -> Handler {
        let uri = req.uri();
        match self.table.resolve(request_host(req), uri.path(), uri.query()) {
            Resolution::Matched(handler) => handler.clone(),
            Resolution::Redirect(target) => {
                tracing::debug!(path = %uri.path(), target = %target, "Redirecting to canonical path");
                Handler::new(move |req: Request<Body>| {
                    let target = target.clone();
                    async move { redirect_response(req.method(), &target, StatusCode::MOVED_PERMANENTLY) }
                })
            }
            Resolution::NotFound => not_found(),
        }
    }

    /// Serve this table as the fallback of an `axum::Router`.
    pub fn into_router(self) -> axum::Router {
        axum::Router::new().fallback_service(self)
    }
}

impl Multiplexer for ServeMux {
    fn register_handler(&mut self, pattern: &str, handler: Handler) {
        if pattern.is_empty() {
            tracing::warn!("Ignoring registration with an empty pattern");
            return;
        }

        let table = Arc::make_mut(&mut self.table);
        if table.entries.insert(pattern.to_string(), handler).is_some() {
            tracing::debug!(pattern, "Pattern registered again, replacing previous handler");
            return;
        }

        if pattern.ends_with('/') {
            let at = table
                .subtrees
                .iter()
                .position(|p| p.len() < pattern.len())
                .unwrap_or(table.subtrees.len());
            table.subtrees.insert(at, pattern.to_string());
        }
        if !pattern.starts_with('/') {
            table.hosts = true;
        }
    }
}

impl Service<Request<Body>> for ServeMux {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let handler = self.handler_for(&req);
        Box::pin(async move { Ok(handler.run(req).await) })
    }
}

impl fmt::Debug for ServeMux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServeMux")
            .field("patterns", &self.patterns())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use tower::ServiceExt;

    fn text(body: &'static str) -> Handler {
        Handler::new(move |_req: Request<Body>| async move { body })
    }

    fn mux(patterns: &[(&str, &'static str)]) -> ServeMux {
        let mut mux = ServeMux::new();
        for &(pattern, body) in patterns {
            mux.register_handler(pattern, text(body));
        }
        mux
    }

    async fn get(mux: &ServeMux, host: &str, uri: &str) -> (StatusCode, Option<String>, String) {
        let req = Request::builder()
            .uri(uri)
            .header(header::HOST, host)
            .body(Body::empty())
            .unwrap();
        let res = mux.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let location = res
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_last_registration_wins() {
        let m = mux(&[("/dup", "first"), ("/dup", "second")]);
        assert_eq!(m.len(), 1);
        assert_eq!(get(&m, "h", "/dup").await.2, "second");
    }

    #[tokio::test]
    async fn test_exact_and_subtree_matching() {
        let m = mux(&[("/", "root"), ("/static/", "static"), ("/static/css/", "css"), ("/about", "about")]);

        assert_eq!(get(&m, "h", "/about").await.2, "about");
        assert_eq!(get(&m, "h", "/about/team").await.2, "root");
        assert_eq!(get(&m, "h", "/static/app.js").await.2, "static");
        assert_eq!(get(&m, "h", "/static/css/site.css").await.2, "css");
        assert_eq!(get(&m, "h", "/anything").await.2, "root");
    }

    #[tokio::test]
    async fn test_not_found() {
        let m = mux(&[("/only", "only")]);
        let (status, _, body) = get(&m, "h", "/other").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "404 page not found\n");
    }

    #[tokio::test]
    async fn test_host_patterns_take_precedence() {
        let m = mux(&[("/", "any"), ("api.example.com/", "api")]);

        assert_eq!(get(&m, "api.example.com:8080", "/x").await.2, "api");
        assert_eq!(get(&m, "www.example.com", "/x").await.2, "any");
        assert_eq!(get(&m, "api.example.com", "/deep/x").await.2, "api");
    }

    #[tokio::test]
    async fn test_redirects_to_subtree_root() {
        let m = mux(&[("/tree/", "tree")]);
        let (status, location, _) = get(&m, "h", "/tree?x=1").await;
        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location.as_deref(), Some("/tree/?x=1"));
    }

    #[tokio::test]
    async fn test_no_slash_redirect_when_exact_registered() {
        let m = mux(&[("/tree/", "subtree"), ("/tree", "exact")]);
        assert_eq!(get(&m, "h", "/tree").await.2, "exact");
    }

    #[tokio::test]
    async fn test_redirects_unclean_paths() {
        let m = mux(&[("/a/b", "ab")]);
        let (status, location, _) = get(&m, "h", "/a/./x/../b").await;
        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location.as_deref(), Some("/a/b"));

        let (_, location, _) = get(&m, "h", "//a//b?q=2").await;
        assert_eq!(location.as_deref(), Some("/a/b?q=2"));
    }

    #[tokio::test]
    async fn test_into_router_dispatches() {
        let router = mux(&[("/ping", "pong")]).into_router();
        let res = router
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"pong");
    }

    #[test]
    fn test_empty_pattern_is_ignored() {
        let m = mux(&[("", "nothing")]);
        assert!(m.is_empty());
    }
}
