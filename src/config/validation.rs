//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - CORS values must be sendable as header values
//! - Addresses must parse, timeouts must be non-zero
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::{GatewayConfig, ProxyConfig};

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: {value:?} is not a valid header value")]
    InvalidHeaderValue { field: &'static str, value: String },

    #[error("proxy.api_prefix: {0:?} must start with '/'")]
    InvalidApiPrefix(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Check a config for semantic errors, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    let proxy = &config.proxy;
    if let Err(e) = cors_header_values(proxy) {
        errors.extend(e);
    }

    if !proxy.api_prefix.is_empty() && !proxy.api_prefix.starts_with('/') {
        errors.push(ValidationError::InvalidApiPrefix(proxy.api_prefix.clone()));
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

/// Parse the four CORS settings into header values, in the order
/// allow-origin, allow-credentials, allow-methods, allow-headers.
pub fn cors_header_values(proxy: &ProxyConfig) -> Result<[HeaderValue; 4], Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut parse = |field: &'static str, raw: &str| {
        HeaderValue::from_str(raw).unwrap_or_else(|_| {
            errors.push(ValidationError::InvalidHeaderValue {
                field,
                value: raw.to_string(),
            });
            HeaderValue::from_static("")
        })
    };

    let values = [
        parse("proxy.allow_origin", &proxy.allow_origin),
        parse("proxy.allow_creds", &proxy.allow_creds),
        parse("proxy.allow_methods", &proxy.allow_methods),
        parse("proxy.allow_headers", &proxy.allow_headers),
    ];

    if errors.is_empty() {
        Ok(values)
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
