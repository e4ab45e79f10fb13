//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file. Table and key names follow the dotted settings the gateway reads,
//! e.g. `proxy.allow_origin` is `allow_origin` under `[proxy]`.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// CORS policy and API mount point.
    pub proxy: ProxyConfig,

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
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// The `[proxy]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// `Access-Control-Allow-Origin`. `*` reflects the request's Origin.
    pub allow_origin: String,

    /// `Access-Control-Allow-Credentials`.
    pub allow_creds: String,

    /// `Access-Control-Allow-Methods`.
    pub allow_methods: String,

    /// `Access-Control-Allow-Headers`.
    pub allow_headers: String,

    /// Path the gateway service is mounted under. Normalized to end in `/`.
    pub api_prefix: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_creds: "true".to_string(),
            allow_methods: "GET, POST, PUT, PATCH, DELETE, OPTIONS".to_string(),
            allow_headers: "Authorization, Content-Type".to_string(),
            api_prefix: "/".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.proxy.allow_origin, "*");
        assert_eq!(config.proxy.api_prefix, "/");
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_proxy_table() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [proxy]
            allow_origin = "https://app.example.com"
            allow_creds = "false"
            api_prefix = "/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.proxy.allow_origin, "https://app.example.com");
        assert_eq!(config.proxy.allow_creds, "false");
        assert_eq!(config.proxy.api_prefix, "/api");
        assert_eq!(config.proxy.allow_headers, "Authorization, Content-Type");
    }
}
