//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use route_compose::{handle, Endpoint, Handler, HttpServer, Middleware, Route, ServeMux, Shutdown};

/// Ordered record of which middleware and handlers ran.
pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::default()
}

pub fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

/// Middleware recording `name:pre` before and `name:post` after the wrapped
/// handler.
pub fn tag(log: &Log, name: &'static str) -> Middleware {
    let log = log.clone();
    Middleware::from_fn(move |req: Request<Body>, next: Handler| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(format!("{name}:pre"));
            let res = next.run(req).await;
            log.lock().unwrap().push(format!("{name}:post"));
            res
        }
    })
}

/// A route whose handler records `name` and answers with `name`.
pub fn recorded_route(log: &Log, pattern: &str, name: &'static str, mw: Vec<Middleware>) -> Route {
    let log = log.clone();
    let endpoint = Endpoint::function(move |_req: Request<Body>| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(name.to_string());
            name
        }
    });
    handle(pattern, endpoint, mw).unwrap()
}

pub async fn body_string(res: Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Dispatch one GET request through the mux.
pub async fn get(mux: &ServeMux, uri: &str) -> Response {
    let req = Request::builder()
        .uri(uri)
        .header("host", "test.local")
        .body(Body::empty())
        .unwrap();
    mux.clone().oneshot(req).await.unwrap()
}

/// Serve `mux` on an ephemeral local port. The handle resolves once the
/// server has stopped.
pub async fn spawn_server(
    mux: ServeMux,
    shutdown: &Shutdown,
) -> (SocketAddr, JoinHandle<io::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(mux);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));
    (addr, handle)
}
