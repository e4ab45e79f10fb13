//! CORS decoration for the gateway service.
//!
//! # Responsibilities
//! - Stamp the four `Access-Control-Allow-*` headers on every response
//! - Reflect the request Origin when the configured origin is `*`
//! - Answer preflight requests without reaching the wrapped service
//!
//! # Design Decisions
//! - Header values are validated once, when the policy is built
//! - Values a handler sets itself are left alone
//!
//! Reflecting Origin for `*` effectively allows any origin with credentials.
//! Configure an explicit origin when that is not wanted.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
        },
        HeaderMap, HeaderValue, Method, Request, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};

use crate::config::validation::cors_header_values;
use crate::config::{ConfigError, ProxyConfig};
use crate::observability::metrics;

/// CORS response headers, built from the `[proxy]` config table.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
    allow_credentials: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsPolicy {
    /// Build a policy, rejecting values that cannot be sent as headers.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ConfigError> {
        let [allow_origin, allow_credentials, allow_methods, allow_headers] =
            cors_header_values(config).map_err(ConfigError::Validation)?;

        Ok(Self {
            allow_origin,
            allow_credentials,
            allow_methods,
            allow_headers,
        })
    }

    /// The allow-origin value to send for a request carrying `origin`.
    pub fn allow_origin_for(&self, origin: Option<&HeaderValue>) -> HeaderValue {
        match origin {
            Some(origin) if self.allow_origin == "*" && !origin.is_empty() => origin.clone(),
            _ => self.allow_origin.clone(),
        }
    }

    /// Write the CORS headers, keeping any value already present.
    fn apply(&self, allow_origin: HeaderValue, headers: &mut HeaderMap) {
        for (name, value) in [
            (ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin),
            (ACCESS_CONTROL_ALLOW_CREDENTIALS, self.allow_credentials.clone()),
            (ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone()),
            (ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone()),
        ] {
            headers.entry(name).or_insert(value);
        }
    }
}

/// A CORS preflight: `OPTIONS` carrying `Access-Control-Request-Method`.
pub fn is_preflight<B>(req: &Request<B>) -> bool {
    req.method() == Method::OPTIONS
        && req
            .headers()
            .get(ACCESS_CONTROL_REQUEST_METHOD)
            .is_some_and(|v| !v.is_empty())
}

/// Middleware applying a [`CorsPolicy`] to every request.
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let allow_origin = policy.allow_origin_for(req.headers().get(ORIGIN));

    if is_preflight(&req) {
        tracing::debug!(
            path = %req.uri().path(),
            origin = ?allow_origin,
            "Answering CORS preflight"
        );
        metrics::record_preflight();
        let mut response = StatusCode::OK.into_response();
        policy.apply(allow_origin, response.headers_mut());
        return response;
    }

    let mut response = next.run(req).await;
    policy.apply(allow_origin, response.headers_mut());
    response
}

/// Wrap `handler` so every response carries the CORS headers of `policy`.
pub fn allow_cors(handler: Router, policy: CorsPolicy) -> Router {
    handler.layer(middleware::from_fn_with_state(
        Arc::new(policy),
        cors_middleware,
    ))
}
