//! Path helpers for builders that resolve auxiliary resources (sprite
//! sheets, sub-documents) named inside a stream.

/// The last `/`-separated component of a path.
pub fn last_path_component(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// The path with its final extension (if any) removed.
pub fn strip_extension(path: &str) -> &str {
    match path.rfind('.') {
        Some(pos) => &path[..pos],
        None => path,
    }
}

/// True if `path` ends with `suffix`, compared ASCII case-insensitively.
pub fn has_suffix_ignore_case(path: &str, suffix: &str) -> bool {
    // Compare bytes: the suffix boundary may fall inside a multibyte
    // character, which a str slice would reject.
    let path = path.as_bytes();
    let suffix = suffix.as_bytes();
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
