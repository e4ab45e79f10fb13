//! HTTP header ⇄ gRPC metadata translation.
//!
//! # Data Flow
//! ```text
//! Incoming HTTP request headers
//!     → canonical.rs (MIME canonical capitalization)
//!     → matcher.rs (permanent / reserved / dropped / forwarded)
//!     → metadata.rs (build tonic MetadataMap)
//!     → [gRPC upstream]
//!
//! Outgoing gRPC response metadata
//!     → matcher.rs (identity)
//!     → metadata.rs (build HTTP HeaderMap)
//!     → Client response
//! ```
//!
//! # Design Decisions
//! - Matchers are total: every header name maps to a key or is dropped
//! - Permanent headers live in a static set, not a branch chain
//! - The matcher is a trait so callers can plug in their own policy

pub mod canonical;
pub mod matcher;
pub mod metadata;
pub mod permanent;

pub use canonical::canonical_header_key;
pub use matcher::{
    incoming_header_matcher, is_reserved, outgoing_header_matcher, HeaderMatcher,
    IncomingHeaders, OutgoingHeaders, METADATA_PREFIX,
};
pub use metadata::{headers_from_metadata, metadata_from_headers};
pub use permanent::{is_permanent_http_header, PERMANENT_HTTP_HEADERS};
