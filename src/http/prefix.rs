//! API path prefix normalization.

/// Force `prefix` to be non-empty and end with a slash.
pub fn sanitize_api_prefix(prefix: &str) -> String {
    if prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}
