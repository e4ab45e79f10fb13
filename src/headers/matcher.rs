//! Header matchers plugged into the gateway's translation layer.
//!
//! # Responsibilities
//! - Decide which inbound HTTP headers become gRPC metadata, and under which key
//! - Decide which outbound gRPC metadata becomes HTTP response headers
//!
//! # Inbound rules (first match wins)
//! 1. Permanent HTTP headers → `grpcgateway-<Name>`
//! 2. `Grpc-*` (reserved by gRPC) → `X-Grpc-*`
//! 3. `Content-Length` → dropped (Istio sidecars reject it)
//! 4. Anything else → forwarded as-is

use crate::headers::canonical::canonical_header_key;
use crate::headers::permanent::is_permanent_http_header;

/// Metadata namespace for well-known HTTP headers.
pub const METADATA_PREFIX: &str = "grpcgateway-";

const RESERVED_PREFIX: &str = "Grpc-";

/// Decides whether a header/metadata key crosses the gateway, and as what.
///
/// `None` means the key is dropped.
pub trait HeaderMatcher: Send + Sync {
    fn match_header(&self, key: &str) -> Option<String>;
}

impl<F> HeaderMatcher for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn match_header(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Inbound policy: HTTP request header → gRPC metadata key.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncomingHeaders;

impl HeaderMatcher for IncomingHeaders {
    fn match_header(&self, key: &str) -> Option<String> {
        incoming_header_matcher(key)
    }
}

/// Outbound policy: gRPC metadata key → HTTP response header.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutgoingHeaders;

impl HeaderMatcher for OutgoingHeaders {
    fn match_header(&self, key: &str) -> Option<String> {
        outgoing_header_matcher(key)
    }
}

/// Whether the key is reserved by gRPC. Case-sensitive on the canonical form.
pub fn is_reserved(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX)
}

/// Map an HTTP header name to the gRPC metadata key it is forwarded as.
pub fn incoming_header_matcher(key: &str) -> Option<String> {
    let key = canonical_header_key(key);

    if is_permanent_http_header(&key) {
        return Some(format!("{METADATA_PREFIX}{key}"));
    }
    if is_reserved(&key) {
        return Some(format!("X-{key}"));
    }
    if key == "Content-Length" {
        tracing::trace!(header = %key, "Dropping inbound header");
        return None;
    }

    Some(key)
}

/// Map outgoing gRPC metadata to an HTTP header. Everything is returned as-is.
pub fn outgoing_header_matcher(key: &str) -> Option<String> {
    Some(key.to_string())
}
