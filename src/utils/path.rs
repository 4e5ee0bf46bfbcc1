//! Logical path and output path helpers.
//!
//! Output paths are joined with a literal `/` and never normalized, so
//! the names callers see are exactly the names written.

use std::path::Path;

/// Split a logical path at its final extension.
///
/// The extension is the last `.xxx` of the last segment (dot included);
/// the stem keeps any directory part.
///
/// ```
/// use stamp::utils::path::split_extension;
///
/// assert_eq!(split_extension("app.js"), ("app", ".js"));
/// assert_eq!(split_extension("vendor/modernizr.js"), ("vendor/modernizr", ".js"));
/// assert_eq!(split_extension("lib/jquery.min.js"), ("lib/jquery.min", ".js"));
/// assert_eq!(split_extension("vendor.d/README"), ("vendor.d/README", ""));
/// ```
pub fn split_extension(logical_path: &str) -> (&str, &str) {
    let segment_start = logical_path.rfind('/').map_or(0, |i| i + 1);
    match logical_path[segment_start..].rfind('.') {
        // A leading dot names a hidden file, not an extension
        Some(0) | None => (logical_path, ""),
        Some(dot) => logical_path.split_at(segment_start + dot),
    }
}

/// Join two path fragments with a literal `/`, skipping empty ones.
pub fn join_slash(base: &str, rest: &str) -> String {
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}/{rest}"),
    }
}

/// Whether `path` is absolute, either by leading `/` or by platform rules.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || Path::new(path).is_absolute()
}
