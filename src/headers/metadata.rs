//! Bulk translation between `http::HeaderMap` and tonic `MetadataMap`.

use axum::http::{HeaderMap, HeaderName};
use tonic::metadata::MetadataMap;

use crate::headers::matcher::HeaderMatcher;
use crate::observability::metrics::{self, DropReason};

/// Build outbound gRPC metadata from inbound HTTP request headers.
///
/// Every value of a multi-valued header is carried over. Headers the matcher
/// drops, or whose mapped key is not a legal header name, are skipped.
pub fn metadata_from_headers(headers: &HeaderMap, matcher: &impl HeaderMatcher) -> MetadataMap {
    MetadataMap::from_headers(translate(headers, matcher))
}

/// Build HTTP response headers from gRPC response metadata.
pub fn headers_from_metadata(metadata: &MetadataMap, matcher: &impl HeaderMatcher) -> HeaderMap {
    translate(&metadata.clone().into_headers(), matcher)
}

fn translate(headers: &HeaderMap, matcher: &impl HeaderMatcher) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());

    for name in headers.keys() {
        let Some(mapped) = matcher.match_header(name.as_str()) else {
            metrics::record_dropped_header(DropReason::Matcher);
            continue;
        };

        let mapped = match HeaderName::from_bytes(mapped.as_bytes()) {
            Ok(n) => n,
            Err(_) => {
                tracing::debug!(header = %name, mapped = %mapped, "Mapped key is not a valid header name");
                metrics::record_dropped_header(DropReason::InvalidName);
                continue;
            }
        };

        for value in headers.get_all(name) {
            out.append(mapped.clone(), value.clone());
        }
    }

    out
}
