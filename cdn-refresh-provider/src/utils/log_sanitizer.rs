//! Log sanitization utilities
//!
//! Keeps access keys and oversized vendor responses out of debug/error logs.

/// Maximum number of bytes of a response body to include in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a key id left visible by [`mask_secret`].
const MASK_VISIBLE_PREFIX: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Bodies over the limit keep their first `TRUNCATE_LIMIT` bytes (on a char boundary)
/// followed by the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an access key id for logging: `LTAI5tXXXX` -> `LTAI******`.
///
/// Short values are fully masked.
pub fn mask_secret(s: &str) -> String {
    let char_count = s.chars().count();
    if char_count <= MASK_VISIBLE_PREFIX * 2 {
        return "*".repeat(char_count);
    }
    let prefix: String = s.chars().take(MASK_VISIBLE_PREFIX).collect();
    format!("{prefix}{}", "*".repeat(char_count - MASK_VISIBLE_PREFIX))
}
