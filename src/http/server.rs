//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Mount the gateway service under the configured API prefix
//! - Wire up middleware (CORS, timeout, tracing)
//! - Bind server to listener and serve until shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header::LOCATION, HeaderMap, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    Router,
};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tonic::metadata::MetadataMap;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{validate_config, ConfigError, GatewayConfig};
use crate::headers::{headers_from_metadata, metadata_from_headers, IncomingHeaders, OutgoingHeaders};
use crate::http::cors::{allow_cors, CorsPolicy};
use crate::http::prefix::sanitize_api_prefix;

/// HTTP server fronting the gateway service.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `service` with the given configuration.
    ///
    /// The config is validated here as well, so programmatic configs get the
    /// same checks as ones read by `load_config`.
    pub fn new(config: GatewayConfig, service: Router) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let router = Self::build_router(&config, service)?;
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, service: Router) -> Result<Router, ConfigError> {
        let policy = CorsPolicy::from_config(&config.proxy)?;
        let prefix: Arc<str> = sanitize_api_prefix(&config.proxy.api_prefix).into();

        tracing::debug!(api_prefix = %prefix, "Mounting gateway service");

        Ok(allow_cors(service, policy)
            .layer(middleware::from_fn_with_state(prefix, prefix_guard))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http()))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            api_prefix = %sanitize_api_prefix(&self.config.proxy.api_prefix),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Reject requests outside the API prefix before they reach CORS handling.
///
/// The prefix itself without its trailing slash is redirected to the
/// slash-terminated form, keeping the query string.
async fn prefix_guard(State(prefix): State<Arc<str>>, req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path();
    if path.starts_with(&*prefix) {
        return next.run(req).await;
    }

    if prefix.strip_suffix('/') == Some(path) {
        let location = match req.uri().query() {
            Some(query) => format!("{prefix}?{query}"),
            None => prefix.to_string(),
        };
        return (StatusCode::MOVED_PERMANENTLY, [(LOCATION, location)]).into_response();
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Diagnostic service: reports the metadata an upstream would receive.
///
/// The body lists the translated request metadata. The metadata count comes
/// back as response metadata, passed through the outgoing matcher.
pub async fn metadata_echo(headers: HeaderMap) -> Response {
    let metadata = metadata_from_headers(&headers, &IncomingHeaders);

    let mut body = Map::new();
    let translated = metadata.clone().into_headers();
    for name in translated.keys() {
        let values = translated
            .get_all(name)
            .iter()
            .map(|v| Value::String(String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        body.insert(name.as_str().to_string(), Value::Array(values));
    }

    let mut trailers = MetadataMap::new();
    trailers.insert("x-metadata-count", metadata.len().into());

    let mut response = Json(Value::Object(body)).into_response();
    response
        .headers_mut()
        .extend(headers_from_metadata(&trailers, &OutgoingHeaders));
    response
}

/// Router exposing [`metadata_echo`] on every path.
pub fn metadata_echo_service() -> Router {
    Router::new()
        .route("/", axum::routing::any(metadata_echo))
        .route("/{*path}", axum::routing::any(metadata_echo))
}

/// Wait for shutdown signal (Ctrl+C).
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
    use tower::ServiceExt;

    fn server(api_prefix: &str) -> HttpServer {
        let mut config = GatewayConfig::default();
        config.proxy.api_prefix = api_prefix.to_string();
        HttpServer::new(config, metadata_echo_service()).unwrap()
    }

    async fn json_body(res: Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_echo_reports_translated_metadata() {
        let req = Request::builder()
            .uri("/api/v1/things")
            .header("User-Agent", "test-agent")
            .header("Grpc-Timeout", "1S")
            .header("X-Request-Id", "r-1")
            .body(Body::empty())
            .unwrap();

        let res = server("/api").router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["x-metadata-count"], "3");
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let body = json_body(res).await;
        assert_eq!(body["grpcgateway-user-agent"][0], "test-agent");
        assert_eq!(body["x-grpc-timeout"][0], "1S");
        assert_eq!(body["x-request-id"][0], "r-1");
        assert!(body.get("user-agent").is_none());
    }

    #[tokio::test]
    async fn test_outside_prefix_is_not_found() {
        let req = Request::builder()
            .uri("/other")
            .header("Origin", "https://example.com")
            .body(Body::empty())
            .unwrap();

        let res = server("/api").router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_empty_prefix_serves_everything() {
        let req = Request::builder().uri("/anything").body(Body::empty()).unwrap();
        let res = server("").router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[test]
    fn test_invalid_cors_config_fails_construction() {
        let mut config = GatewayConfig::default();
        config.proxy.allow_headers = "a\nb".into();
        assert!(HttpServer::new(config, metadata_echo_service()).is_err());
    }

    #[test]
    fn test_relative_api_prefix_fails_construction() {
        let mut config = GatewayConfig::default();
        config.proxy.api_prefix = "api".into();

        let err = HttpServer::new(config, metadata_echo_service())
            .err()
            .expect("relative prefix should be rejected");
        assert!(matches!(
            err,
            ConfigError::Validation(ref e) if e == &[ValidationError::InvalidApiPrefix("api".into())]
        ));
    }

    #[test]
    fn test_zero_timeout_fails_construction() {
        let mut config = GatewayConfig::default();
        config.timeouts.request_secs = 0;
        assert!(HttpServer::new(config, metadata_echo_service()).is_err());
    }

    #[tokio::test]
    async fn test_bare_prefix_redirects_to_slash() {
        let req = Request::builder()
            .uri("/api?page=2")
            .body(Body::empty())
            .unwrap();

        let res = server("/api").router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.headers()[LOCATION], "/api/?page=2");

        let req = Request::builder().uri("/api").body(Body::empty()).unwrap();
        let res = server("/api/").router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.headers()[LOCATION], "/api/");
    }
}
