//! HTTP server setup.
//!
//! # Responsibilities
//! - Mount a composed [`ServeMux`] as an axum service
//! - Add transport-level request tracing
//! - Serve a listener until the shutdown broadcast fires

use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::mux::ServeMux;

/// Serves one composed dispatch table.
pub struct HttpServer {
    name: String,
    router: axum::Router,
}

impl HttpServer {
    pub fn new(mux: ServeMux) -> Self {
        tracing::debug!(routes = mux.len(), "Mounting dispatch table");
        Self {
            name: "http".to_string(),
            router: mux.into_router().layer(TraceLayer::new_for_http()),
        }
    }

    /// Label used in logs, to tell several servers apart.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Run until `shutdown` receives a value (or its sender is dropped).
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(server = %self.name, address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(server = %self.name, "HTTP server stopped");
        Ok(())
    }
}
