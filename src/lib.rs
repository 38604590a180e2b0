//! Route composition library.
//!
//! Endpoints are declared with [`handle`], bundled into nested [`Group`]s,
//! wrapped with [`Middleware`] at any level and flattened by a [`Router`] into
//! a single dispatch table ([`ServeMux`] by default).

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod lifecycle;
pub mod middleware;
pub mod mux;
pub mod observability;
pub mod routing;

pub use config::AppConfig;
pub use error::ConfigError;
pub use handler::{Endpoint, Handler};
pub use http::{redirect, HttpServer, Redirect};
pub use lifecycle::Shutdown;
pub use middleware::Middleware;
pub use mux::{Multiplexer, ServeMux};
pub use routing::{handle, Group, Member, Route, Router, Routes};
