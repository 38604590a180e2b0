//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Every field has a default so an empty file is a valid config
//! - Validation reports all problems at once, not just the first
//! - The route tree itself is code, not config; only the serving
//!   environment is configurable

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, LoadError};
pub use schema::{AppConfig, ListenerConfig, ObservabilityConfig, RedirectConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
