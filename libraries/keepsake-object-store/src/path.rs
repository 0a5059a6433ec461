//! Object path normalization
//!
//! Object keys are `/`-separated and always relative to their bucket.

use crate::error::{ObjectStoreError, Result};

/// Normalize a listing prefix; the empty string is the bucket root
pub fn normalize_prefix(prefix: &str) -> Result<String> {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    normalize_key(trimmed)
}

/// Normalize an object key, rejecting anything that could leave the bucket
pub fn normalize_key(path: &str) -> Result<String> {
    if path.starts_with('/') || path.contains('\\') || path.contains('\0') {
        return Err(ObjectStoreError::InvalidPath(path.to_string()));
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ObjectStoreError::InvalidPath(path.to_string()));
    }

    for segment in trimmed.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(ObjectStoreError::InvalidPath(path.to_string()));
        }
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_keys() {
        assert_eq!(normalize_key("2024/beach.jpg").unwrap(), "2024/beach.jpg");
        assert_eq!(normalize_key("a.mp3").unwrap(), "a.mp3");
    }

    #[test]
    fn rejects_traversal() {
        for bad in ["../secret", "a/../../b", "/etc/passwd", "a//b", "./a", "a\\b", ""] {
            assert!(normalize_key(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn prefix_root_is_empty() {
        assert_eq!(normalize_prefix("").unwrap(), "");
        assert_eq!(normalize_prefix("/").unwrap(), "");
        assert_eq!(normalize_prefix("2024/").unwrap(), "2024");
        assert!(normalize_prefix("../x").is_err());
    }
}
