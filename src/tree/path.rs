//! Slash-delimited path splitting
//!
//! No normalization: `.`/`..` are ordinary names and empty segments from
//! leading, trailing or doubled slashes are kept as literal empty strings.

use crate::error::TreeError;

pub const SEPARATOR: char = '/';

/// Split a path into its segments, keeping empty segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).collect()
}

/// Split a path for creation, rejecting any empty segment.
///
/// An empty segment would create an unnamed directory, so `""`, `"/a"`, `"a/"`
/// and `"a//b"` are all refused before the store is touched.
pub fn creatable_segments(path: &str) -> Result<Vec<&str>, TreeError> {
    let parts = segments(path);
    if parts.iter().any(|segment| segment.is_empty()) {
        return Err(TreeError::InvalidPath(path.to_string()));
    }
    Ok(parts)
}

/// First segment of a path; the name of the top-level directory it lives under.
pub fn root_segment(path: &str) -> &str {
    path.split(SEPARATOR).next().unwrap_or(path)
}
