//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, port suffixes and timeouts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: port suffix {value:?} must look like \":8080\"")]
    InvalidSuffix { field: &'static str, value: String },

    #[error("redirect.host must not be empty")]
    EmptyRedirectHost,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);

    if config.redirect.enabled {
        let redirect = &config.redirect;
        check_address(&mut errors, "redirect.bind_address", &redirect.bind_address);
        check_suffix(&mut errors, "redirect.http_suffix", &redirect.http_suffix);
        check_suffix(&mut errors, "redirect.https_suffix", &redirect.https_suffix);
        if redirect.host.is_empty() {
            errors.push(ValidationError::EmptyRedirectHost);
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_suffix(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let valid = value
        .strip_prefix(':')
        .is_some_and(|port| port.parse::<u16>().is_ok());
    if !valid {
        errors.push(ValidationError::InvalidSuffix {
            field,
            value: value.to_string(),
        });
    }
}
