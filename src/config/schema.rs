//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default listen address of the relay.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Deadline for an outbound check (HEAD) request.
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 5;

/// Deadline for an outbound favicon (GET) request.
pub const DEFAULT_ICON_TIMEOUT_SECS: u64 = 8;

/// Deadline for producing a response to an inbound request.
pub const DEFAULT_SERVER_TIMEOUT_SECS: u64 = 10;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
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
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

/// Timeout configuration for outbound calls and inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Outbound HEAD deadline for `/check` in seconds.
    pub check_secs: u64,

    /// Outbound GET deadline for `/get-icon` in seconds.
    pub icon_secs: u64,

    /// Inbound request deadline in seconds.
    pub server_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            check_secs: DEFAULT_CHECK_TIMEOUT_SECS,
            icon_secs: DEFAULT_ICON_TIMEOUT_SECS,
            server_secs: DEFAULT_SERVER_TIMEOUT_SECS,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
