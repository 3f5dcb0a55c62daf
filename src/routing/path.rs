//! Path normalization
//!
//! Registration paths and group prefixes arrive in whatever shape the
//! application wrote them ("users", "/users/", "//"). Every path that reaches
//! the route table goes through `clean`/`join` first so that one canonical
//! spelling exists per route: a single leading slash, no trailing slash
//! except for the root itself.

/// Normalize a path segment.
///
/// Empty string or "/" become "/". Anything else gets exactly one leading
/// slash and loses all trailing slashes.
pub fn clean(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    format!("/{trimmed}")
}

/// Join a scope prefix with a relative path.
///
/// A root or empty prefix contributes nothing. Otherwise both sides are
/// cleaned before concatenation, so the result never contains a double
/// slash: the prefix has no trailing slash and the suffix has exactly one
/// leading slash.
pub fn join(prefix: &str, path: &str) -> String {
    if prefix.is_empty() || prefix == "/" {
        return clean(path);
    }
    if path.is_empty() || path == "/" {
        return clean(prefix);
    }

    format!("{}{}", clean(prefix), clean(path))
}
