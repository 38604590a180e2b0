//! Configuration-time errors raised while declaring routes.
//!
//! Unsupported handler types and unsupported group members cannot be
//! expressed at all ([`crate::Endpoint`] and [`crate::Member`] are closed
//! enums), so the only failures left are malformed patterns.

use thiserror::Error;

/// Error returned by [`crate::handle`] for a route that cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The pattern was the empty string.
    #[error("route pattern must not be empty")]
    EmptyPattern,

    /// The pattern has no path component.
    #[error("invalid route pattern {pattern:?}: a pattern must contain a '/' (use \"/\" for the root)")]
    InvalidPattern { pattern: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_pattern() {
        let err = ConfigError::InvalidPattern {
            pattern: "users".into(),
        };
        assert!(err.to_string().contains("\"users\""));
        assert_eq!(
            ConfigError::EmptyPattern.to_string(),
            "route pattern must not be empty"
        );
    }
}
