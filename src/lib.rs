//! HTTP-to-gRPC gateway edge: header/metadata translation and CORS.

pub mod config;
pub mod headers;
pub mod http;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
