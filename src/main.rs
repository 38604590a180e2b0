//! route-compose demo server.
//!
//! # Route tree
//!
//! ```text
//! Router                      wrap: timeout, trace
//! ├── /healthz
//! └── Group (api)             wrap: request_id
//!     ├── /api/status
//!     ├── /api/echo           (tower service endpoint)
//!     └── Group (admin)       wrap: x-robots-tag header
//!         └── /api/admin/
//! ```
//!
//! A request to `/api/admin/x` runs: trace → timeout → request_id →
//! header → admin handler.

use std::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::Json;
use clap::Parser;
use tokio::net::TcpListener;

use route_compose::config::{load_config, AppConfig};
use route_compose::lifecycle::signals::shutdown_on_ctrl_c;
use route_compose::observability::logging;
use route_compose::{
    handle, middleware, ConfigError, Endpoint, Group, HttpServer, Redirect, Router, Routes,
    ServeMux, Shutdown,
};

#[derive(Parser)]
#[command(name = "route-compose")]
#[command(about = "Serve a composed route tree", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        redirect = config.redirect.enabled,
        "route-compose starting"
    );

    let mux = match compose_app(&config) {
        Ok(mux) => mux,
        Err(e) => {
            tracing::error!(error = %e, "Invalid route configuration");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    let mut servers = Vec::new();

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    servers.push(tokio::spawn(
        HttpServer::new(mux).named("app").run(listener, shutdown.subscribe()),
    ));

    if config.redirect.enabled {
        let redirect = Redirect::new(&config.redirect.http_suffix, &config.redirect.https_suffix)
            .with_host(&config.redirect.host);
        let mux = Routes::from(handle("/", redirect, [])?).serve();
        let listener = TcpListener::bind(&config.redirect.bind_address).await?;
        servers.push(tokio::spawn(
            HttpServer::new(mux).named("redirect").run(listener, shutdown.subscribe()),
        ));
    }

    tokio::spawn(shutdown_on_ctrl_c(shutdown));

    for server in servers {
        server.await??;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn compose_app(config: &AppConfig) -> Result<ServeMux, ConfigError> {
    let admin = Group::new()
        .add(handle("/api/admin/", Endpoint::function(admin), [])?)
        .wrap([middleware::set_response_header(
            HeaderName::from_static("x-robots-tag"),
            HeaderValue::from_static("noindex"),
        )]);

    let echo = tower::service_fn(|req: Request<Body>| async move {
        Ok::<_, Infallible>(req.into_body())
    });

    let api = Group::new()
        .add(handle("/api/status", Endpoint::function(status), [])?)
        .add(handle("/api/echo", Endpoint::service(echo), [])?)
        .add(admin)
        .wrap([middleware::request_id()]);

    let mux = Router::new()
        .wrap([
            middleware::timeout(Duration::from_secs(config.timeouts.request_secs)),
            middleware::trace(),
        ])
        .add(handle("/healthz", Endpoint::function(health), [])?)
        .compose_with([api]);

    Ok(mux)
}

async fn health(_req: Request<Body>) -> &'static str {
    "ok"
}

async fn status(_req: Request<Body>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn admin(req: Request<Body>) -> String {
    format!("admin: {}", req.uri().path())
}
