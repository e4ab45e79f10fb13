//! MIME header key canonicalization.
//!
//! Canonical form upper-cases the first letter and every letter that follows
//! a hyphen, and lower-cases the rest: `content-type` becomes `Content-Type`.
//! Keys containing anything other than RFC 7230 token characters are left
//! untouched, so a malformed name is never silently rewritten into a
//! different valid one.

/// Returns true for bytes allowed in an HTTP header field name (`tchar`).
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
                | b'`' | b'|' | b'~'
        )
}

/// Convert a header name to its canonical MIME capitalization.
pub fn canonical_header_key(key: &str) -> String {
    if !key.bytes().all(is_token_byte) {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len());
    let mut upper = true;
    for c in key.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}
