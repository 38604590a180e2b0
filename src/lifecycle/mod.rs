//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging → Compose routes → Bind listeners → Serve
//!
//! Shutdown:
//!     Ctrl-C (signals.rs) → Shutdown::trigger (shutdown.rs)
//!     → every server stops accepting and drains in-flight requests
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
