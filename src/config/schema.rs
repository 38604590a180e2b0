//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Main listener.
    pub listener: ListenerConfig,

    /// Optional plain-HTTP listener redirecting to HTTPS.
    pub redirect: RedirectConfig,

    pub timeouts: TimeoutConfig,

    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// HTTP → HTTPS redirect listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    pub enabled: bool,

    /// Bind address of the plain-HTTP listener.
    pub bind_address: String,

    /// Host whose HTTP port is rewritten to the HTTPS port.
    pub host: String,

    /// Port suffix of the plain-HTTP listener (e.g., ":8080").
    pub http_suffix: String,

    /// Port suffix of the TLS listener (e.g., ":8443").
    pub https_suffix: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_address: "0.0.0.0:8081".to_string(),
            host: "localhost".to_string(),
            http_suffix: ":8080".to_string(),
            https_suffix: ":8443".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request handler timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or `EnvFilter` directive (e.g., "info", "route_compose=debug").
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable text.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
