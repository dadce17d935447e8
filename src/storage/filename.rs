//! Untrusted-filename reduction.
//!
//! Both the upload and the download path funnel client-supplied names
//! through `base_name` before touching the filesystem. This is the only
//! defense against path traversal, so it lives in one place.

/// Reduce an untrusted name to its final path segment.
///
/// Splits on both `/` and `\` and keeps the last non-empty segment.
/// Returns `None` for names that reduce to nothing usable (`""`, `.`,
/// `..`), which callers treat as a miss.
///
/// # Examples
/// ```
/// use meshdrop::storage::filename::base_name;
/// assert_eq!(base_name("../../etc/passwd"), Some("passwd"));
/// assert_eq!(base_name("cube.png"), Some("cube.png"));
/// assert_eq!(base_name(".."), None);
/// ```
pub fn base_name(name: &str) -> Option<&str> {
    let base = name
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())?;

    match base {
        "" | "." | ".." => None,
        _ => Some(base),
    }
}

/// Filename with its final extension removed.
///
/// `cube.png` → `cube`; a name without a dot is returned whole. A leading
/// dot alone does not count as an extension separator (`.gitignore` stays
/// `.gitignore`).
pub fn stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}
