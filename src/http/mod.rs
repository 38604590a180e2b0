//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, TraceLayer, graceful shutdown)
//!     → ServeMux (pattern lookup)
//!     → composed route handler (router → group → route middleware → endpoint)
//!
//! Plain-HTTP listener (optional)
//!     → redirect.rs (307 to the https:// equivalent)
//! ```

pub mod redirect;
pub mod request;
pub mod server;

pub use redirect::{redirect, Redirect};
pub use server::HttpServer;
