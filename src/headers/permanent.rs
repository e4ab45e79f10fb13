//! Permanent request headers from the IANA message-headers registry.
//!
//! <http://www.iana.org/assignments/message-headers/message-headers.xml>

use std::collections::HashSet;
use std::sync::LazyLock;

/// Canonical names of the permanent HTTP request headers.
pub const PERMANENT_HTTP_HEADERS: [&str; 24] = [
    "Accept",
    "Accept-Charset",
    "Accept-Language",
    "Accept-Ranges",
    "Authorization",
    "Cache-Control",
    "Content-Type",
    "Cookie",
    "Date",
    "Expect",
    "From",
    "Host",
    "If-Match",
    "If-Modified-Since",
    "If-None-Match",
    "If-Schedule-Tag-Match",
    "If-Unmodified-Since",
    "Max-Forwards",
    "Origin",
    "Pragma",
    "Referer",
    "User-Agent",
    "Via",
    "Warning",
];

static PERMANENT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PERMANENT_HTTP_HEADERS.iter().copied().collect());

/// Whether `hdr` (already canonicalized) is a permanent HTTP header.
pub fn is_permanent_http_header(hdr: &str) -> bool {
    PERMANENT_SET.contains(hdr)
}
