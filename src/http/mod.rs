//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → server.rs (API prefix guard)
//!     → cors.rs (CORS headers, preflight short-circuit)
//!     → gateway service
//! ```

pub mod cors;
pub mod prefix;
pub mod server;

pub use cors::{allow_cors, cors_middleware, CorsPolicy};
pub use prefix::sanitize_api_prefix;
pub use server::HttpServer;
