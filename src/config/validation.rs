//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RelayConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field}: {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.server_secs ({server_secs}) must exceed {field} ({secs})")]
    ServerTimeoutTooShort {
        field: &'static str,
        secs: u64,
        server_secs: u64,
    },

    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
}

/// Check a configuration, collecting every problem.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let timeouts = [
        ("timeouts.check_secs", config.timeouts.check_secs),
        ("timeouts.icon_secs", config.timeouts.icon_secs),
        ("timeouts.server_secs", config.timeouts.server_secs),
    ];
    for (field, secs) in timeouts {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    // Outbound deadlines must fire before the inbound one so that a slow
    // upstream is still reported by the handler, not by the server layer.
    let server_secs = config.timeouts.server_secs;
    let outbound = [
        ("timeouts.check_secs", config.timeouts.check_secs),
        ("timeouts.icon_secs", config.timeouts.icon_secs),
    ];
    for (field, secs) in outbound {
        if server_secs > 0 && secs >= server_secs {
            errors.push(ValidationError::ServerTimeoutTooShort {
                field,
                secs,
                server_secs,
            });
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.check_secs = 0;
        config.timeouts.icon_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout("timeouts.check_secs")));
        assert!(errors.contains(&ValidationError::UnknownLogLevel("loud".into())));
    }

    #[test]
    fn test_server_timeout_must_exceed_outbound_timeouts() {
        let mut config = RelayConfig::default();
        config.timeouts.check_secs = 3;
        config.timeouts.server_secs = 1;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ServerTimeoutTooShort {
            field: "timeouts.check_secs",
            secs: 3,
            server_secs: 1,
        }));
        assert!(errors.contains(&ValidationError::ServerTimeoutTooShort {
            field: "timeouts.icon_secs",
            secs: 8,
            server_secs: 1,
        }));

        config.timeouts.server_secs = 8;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);

        config.timeouts.server_secs = 9;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = RelayConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
