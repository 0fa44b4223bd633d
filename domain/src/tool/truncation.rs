//! Result truncation.
//!
//! Lengths are counted in characters, not bytes, so multi-byte output is never
//! split inside a code point.

/// Cut `text` to `limit` characters and append a removal marker.
///
/// Returns the (possibly shortened) text and whether it was truncated.
/// A `limit` of zero disables truncation.
pub fn truncate_result(text: &str, limit: usize) -> (String, bool) {
    if limit == 0 {
        return (text.to_string(), false);
    }
    let total = text.chars().count();
    if total <= limit {
        return (text.to_string(), false);
    }
    let kept: String = text.chars().take(limit).collect();
    let removed = total - limit;
    (
        format!("{}\n[TRUNCATED: removed {} characters]", kept, removed),
        true,
    )
}

/// Single-line preview of `text` for log output.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace(['\r', '\n'], " ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let head: String = flat.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
