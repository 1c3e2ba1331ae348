//! Comic identifier derivation
//!
//! A comic's display name becomes a URL-safe `uri` via [`sanitize_name`], and
//! every lookup or write keys on [`canonical_uri`] of that value so callers
//! passing a differently formatted uri still reach the same document.

/// Slugify a display name.
///
/// ASCII letters and digits are kept and lowercased. Runs of whitespace,
/// `-` and `_` become a single `-`. Everything else is dropped. No leading or
/// trailing `-` is produced.
///
/// Total: a name without any ASCII alphanumerics yields the empty string.
pub fn sanitize_name(name: &str) -> String {
    let mut uri = String::with_capacity(name.len());
    let mut separator = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if separator && !uri.is_empty() {
                uri.push('-');
            }
            separator = false;
            uri.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            separator = true;
        }
    }

    uri
}

/// Normalize a uri into the store lookup key.
///
/// Lowercases, then splits on `-`, trims whitespace from each segment and
/// drops empty segments. Idempotent.
pub fn canonical_uri(uri: &str) -> String {
    uri.to_lowercase()
        .split('-')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
