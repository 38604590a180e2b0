//! Plain-HTTP to HTTPS redirection.
//!
//! # Responsibilities
//! - Rewrite the local development host from the HTTP port to the TLS port
//! - Rebuild the request target on an `https://` base
//! - Answer with `307 Temporary Redirect` so the method and body are replayed
//!
//! # Design Decisions
//! - Only an exact `host + http_suffix` match is rewritten; other hosts are
//!   kept verbatim
//! - The query is appended only when non-empty (never a bare `?`)

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::handler::{Endpoint, Handler};
use crate::http::request::request_host;

/// Redirects every request to its `https://` equivalent.
#[derive(Debug, Clone)]
pub struct Redirect {
    host: String,
    http_suffix: String,
    https_suffix: String,
}

impl Redirect {
    /// `http_suffix` and `https_suffix` are port suffixes such as `":8080"`
    /// and `":8443"`. The rewritten host defaults to `localhost`.
    pub fn new(http_suffix: impl Into<String>, https_suffix: impl Into<String>) -> Self {
        Self {
            host: "localhost".to_string(),
            http_suffix: http_suffix.into(),
            https_suffix: https_suffix.into(),
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// The absolute `https://` URL `req` is redirected to.
    pub fn target(&self, req: &Request<Body>) -> String {
        let mut host = request_host(req);
        let tls_host;
        if host.strip_prefix(self.host.as_str()) == Some(self.http_suffix.as_str()) {
            tls_host = format!("{}{}", self.host, self.https_suffix);
            host = &tls_host;
        }

        let mut target = format!("https://{host}{}", req.uri().path());
        if let Some(query) = req.uri().query().filter(|q| !q.is_empty()) {
            target.push('?');
            target.push_str(query);
        }
        target
    }

    pub fn into_handler(self) -> Handler {
        Handler::new(move |req: Request<Body>| {
            let target = self.target(&req);
            async move { redirect_response(req.method(), &target, StatusCode::TEMPORARY_REDIRECT) }
        })
    }
}

impl From<Redirect> for Handler {
    fn from(redirect: Redirect) -> Self {
        redirect.into_handler()
    }
}

impl From<Redirect> for Endpoint {
    fn from(redirect: Redirect) -> Self {
        Endpoint::Function(redirect.into_handler())
    }
}

/// Shortcut for `Redirect::new(http_suffix, https_suffix).into_handler()`.
pub fn redirect(http_suffix: &str, https_suffix: &str) -> Handler {
    Redirect::new(http_suffix, https_suffix).into_handler()
}

/// A redirect response carrying `Location: target`. GET requests also get a
/// small HTML body with a link to the target.
pub(crate) fn redirect_response(method: &Method, target: &str, status: StatusCode) -> Response {
    let location = match HeaderValue::from_str(target) {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(target = %target, "Redirect target is not a valid header value");
            return (StatusCode::BAD_REQUEST, "invalid redirect target").into_response();
        }
    };

    let mut builder = axum::http::Response::builder()
        .status(status)
        .header(header::LOCATION, location);
    if method == Method::GET || method == Method::HEAD {
        builder = builder.header(header::CONTENT_TYPE, "text/html; charset=utf-8");
    }
    let body = if method == Method::GET {
        Body::from(format!(
            "<a href=\"{}\">{}</a>.\n",
            html_escape(target),
            status.canonical_reason().unwrap_or_default()
        ))
    } else {
        Body::empty()
    };

    builder
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: Method, host: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, host)
            .body(Body::empty())
            .unwrap()
    }

    fn location(res: &Response) -> &str {
        res.headers()[header::LOCATION].to_str().unwrap()
    }

    #[test]
    fn test_rewrites_local_http_port() {
        let r = Redirect::new(":8080", ":8443");
        let req = request(Method::GET, "localhost:8080", "/foo");
        assert_eq!(r.target(&req), "https://localhost:8443/foo");
    }

    #[test]
    fn test_keeps_query() {
        let r = Redirect::new(":8080", ":8443");
        let req = request(Method::GET, "localhost:8080", "/foo?a=1");
        assert_eq!(r.target(&req), "https://localhost:8443/foo?a=1");
    }

    #[test]
    fn test_empty_query_adds_no_question_mark() {
        let r = Redirect::new(":8080", ":8443");
        let req = request(Method::GET, "localhost:8080", "/foo?");
        assert_eq!(r.target(&req), "https://localhost:8443/foo");
    }

    #[test]
    fn test_other_hosts_unchanged() {
        let r = Redirect::new(":8080", ":8443");
        let req = request(Method::GET, "example.com:8080", "/foo");
        assert_eq!(r.target(&req), "https://example.com:8080/foo");

        let req = request(Method::GET, "localhost:9090", "/foo");
        assert_eq!(r.target(&req), "https://localhost:9090/foo");
    }

    #[test]
    fn test_custom_host() {
        let r = Redirect::new(":80", ":443").with_host("dev.internal");
        let req = request(Method::GET, "dev.internal:80", "/");
        assert_eq!(r.target(&req), "https://dev.internal:443/");
    }

    #[tokio::test]
    async fn test_handler_issues_temporary_redirect() {
        let h = redirect(":8080", ":8443");
        let res = h.run(request(Method::GET, "localhost:8080", "/foo?a=1")).await;

        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&res), "https://localhost:8443/foo?a=1");

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            "<a href=\"https://localhost:8443/foo?a=1\">Temporary Redirect</a>.\n"
        );
    }

    #[tokio::test]
    async fn test_post_redirect_has_no_body() {
        let h = redirect(":8080", ":8443");
        let res = h.run(request(Method::POST, "localhost:8080", "/submit")).await;

        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert!(res.headers().get(header::CONTENT_TYPE).is_none());
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("/a?b=1&c=<d>"), "/a?b=1&amp;c=&lt;d&gt;");
    }
}
