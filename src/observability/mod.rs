//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Composition (startup):
//!     → route declared / registered / replaced events (debug)
//!     → "Router composed" summary (info)
//!
//! Serving:
//!     → TraceLayer spans per connection request
//!     → middleware::trace access events (method, path, status, latency)
//!     → logging.rs (text or JSON to stdout)
//! ```

pub mod logging;
