//! Object storage for artwork images.
//!
//! Objects are written under the media root following the path convention
//! `{collection}/{timestamp}_{name}.webp` and deleted by their stored path
//! string. The media root is typically a directory served by the
//! storefront (or a mounted bucket).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The object path is outside the media root or malformed.
    #[error("invalid object path: {0}")]
    InvalidPath(String),
}

/// Filesystem-backed object storage rooted at the media directory.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    /// Create storage rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write an object, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` for malformed paths and
    /// `StorageError::Io` on filesystem errors.
    pub async fn put(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(target, bytes).await?;
        Ok(())
    }

    /// Delete an object by its stored path string.
    ///
    /// Deleting a path that no longer exists is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` for malformed paths and
    /// `StorageError::Io` on filesystem errors.
    pub async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve an object path against the media root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_object_path(path)?;
        Ok(self.root.join(path))
    }
}

/// Reject absolute paths, traversal, and empty segments.
///
/// # Errors
///
/// Returns `StorageError::InvalidPath` when the path is unsafe to join
/// under the media root.
pub fn validate_object_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() {
        return Err(StorageError::InvalidPath("empty path".to_owned()));
    }
    if path.starts_with('/') || path.contains('\\') {
        return Err(StorageError::InvalidPath(path.to_owned()));
    }
    if path.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return Err(StorageError::InvalidPath(path.to_owned()));
    }
    Ok(())
}

/// Build the storage path for an uploaded image:
/// `{collection}/{timestamp}_{name}.webp`.
#[must_use]
pub fn object_path(collection: &str, original_name: &str, timestamp_millis: i64) -> String {
    format!(
        "{collection}/{timestamp_millis}_{}.webp",
        sanitize_name(original_name)
    )
}

/// Reduce an uploaded filename to a safe stem.
///
/// Strips the extension, keeps unicode alphanumerics plus `-` and `_`, and
/// maps everything else to `-`.
fn sanitize_name(original: &str) -> String {
    let stem = original.rsplit_once('.').map_or(original, |(stem, _)| stem);
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    if cleaned.chars().all(|c| c == '-') {
        "image".to_owned()
    } else {
        cleaned
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_convention() {
        assert_eq!(
            object_path("artworks", "winter light.jpg", 1_760_000_000_123),
            "artworks/1760000000123_winter-light.webp"
        );
    }

    #[test]
    fn test_sanitize_keeps_korean() {
        assert_eq!(
            object_path("artworks", "겨울빛.png", 1),
            "artworks/1_겨울빛.webp"
        );
    }

    #[test]
    fn test_sanitize_degenerate_name() {
        assert_eq!(object_path("artworks", "???.jpg", 1), "artworks/1_image.webp");
    }

    #[test]
    fn test_validate_object_path() {
        assert!(validate_object_path("artworks/1_a.webp").is_ok());
        assert!(validate_object_path("").is_err());
        assert!(validate_object_path("/etc/passwd").is_err());
        assert!(validate_object_path("artworks/../secret").is_err());
        assert!(validate_object_path("artworks//x.webp").is_err());
        assert!(validate_object_path("a\\b.webp").is_err());
    }

    #[tokio::test]
    async fn test_put_and_delete_roundtrip() {
        let root = std::env::temp_dir().join(format!("maru-storage-test-{}", std::process::id()));
        let storage = MediaStorage::new(&root);

        storage.put("artworks/1_test.webp", b"bytes").await.unwrap();
        let on_disk = tokio::fs::read(root.join("artworks/1_test.webp")).await.unwrap();
        assert_eq!(on_disk, b"bytes");

        storage.delete("artworks/1_test.webp").await.unwrap();
        // Deleting again is fine.
        storage.delete("artworks/1_test.webp").await.unwrap();

        let _ = tokio::fs::remove_dir_all(root).await;
    }
}
