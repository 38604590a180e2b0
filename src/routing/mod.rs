//! Route composition subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint + route middleware
//!     → route.rs (handle: validate pattern, wrap endpoint)
//!     → group.rs (Group::add, Group::wrap)
//!     → group.rs (Group::compose: direct routes ++ sub-groups, wrap with group middleware)
//!     → router.rs (Router::compose: flatten groups, wrap with router middleware)
//!     → Multiplexer::register_handler for every route
//! ```
//!
//! # Design Decisions
//! - Builders take `self` and return the updated value; no shared mutable state
//! - Composition is a pure function of the tree, repeated calls agree
//! - Direct routes come before sub-group routes when a level is flattened
//! - Patterns are never rewritten during composition, only handlers are

pub mod group;
pub mod route;
pub mod router;

pub use group::{Group, Member};
pub use route::{handle, Route, Routes};
pub use router::Router;
