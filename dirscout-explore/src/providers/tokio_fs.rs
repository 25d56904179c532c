//! Filesystem provider backed by `tokio::fs`.

use std::path::Path;

use async_trait::async_trait;
use tracing::warn;

use dirscout_core::{DirectoryEntry, FilesystemProvider, Result, StatRecord};

/// The default provider, reading the real filesystem through `tokio::fs`.
///
/// Listings are sorted by entry name so traversal order is the same on
/// every platform, regardless of what order the OS hands entries back in.
/// Entry type flags come from the listing itself without following links,
/// which keeps symlinked directories out of the descent path.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFilesystem;

impl TokioFilesystem {
    /// Create a new filesystem provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FilesystemProvider for TokioFilesystem {
    async fn list_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        let mut reader = tokio::fs::read_dir(path).await?;
        let mut entries = Vec::new();

        while let Some(dir_entry) = reader.next_entry().await? {
            let Some(name) = dir_entry.file_name().to_str().map(str::to_owned) else {
                warn!(
                    "Skipping entry with non-UTF-8 name in {}",
                    path.display()
                );
                continue;
            };

            let entry = match dir_entry.file_type().await {
                Ok(file_type) if file_type.is_symlink() => DirectoryEntry::symlink(name, path),
                Ok(file_type) if file_type.is_dir() => DirectoryEntry::directory(name, path),
                Ok(_) => DirectoryEntry::file(name, path),
                Err(error) => {
                    // The entry vanished between readdir and the type
                    // lookup. Keep it as a leaf so callers still see it.
                    warn!(
                        "Failed to read type of {} in {}: {}",
                        name,
                        path.display(),
                        error
                    );
                    DirectoryEntry::file(name, path)
                }
            };
            entries.push(entry);
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn stat(&self, path: &Path) -> Result<StatRecord> {
        let link_metadata = tokio::fs::symlink_metadata(path).await?;
        let is_symlink = link_metadata.file_type().is_symlink();

        let metadata = if is_symlink {
            match tokio::fs::metadata(path).await {
                Ok(target_metadata) => target_metadata,
                Err(error) => {
                    // Broken link: report the link's own metadata rather
                    // than failing the stat outright.
                    warn!(
                        "Failed to follow symlink {}: {}",
                        path.display(),
                        error
                    );
                    link_metadata
                }
            }
        } else {
            link_metadata
        };

        Ok(StatRecord {
            size: metadata.len(),
            created: metadata.created().ok(),
            modified: metadata.modified().ok(),
            accessed: metadata.accessed().ok(),
            is_file: metadata.is_file(),
            is_directory: metadata.is_dir(),
            is_symlink,
        })
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn populated_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("b.txt"), b"hello").await.unwrap();
        tokio::fs::write(dir.path().join("a.txt"), b"hi").await.unwrap();
        tokio::fs::create_dir(dir.path().join("sub")).await.unwrap();
        dir
    }

    #[tokio::test]
    async fn test_listing_is_sorted_by_name() {
        let dir = populated_dir().await;
        let provider = TokioFilesystem::new();

        let entries = provider.list_directory(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt", "sub"]);
    }

    #[tokio::test]
    async fn test_listing_flags_and_full_paths() {
        let dir = populated_dir().await;
        let provider = TokioFilesystem::new();

        let entries = provider.list_directory(dir.path()).await.unwrap();
        let sub = entries.iter().find(|e| e.name == "sub").unwrap();
        assert!(sub.is_directory);
        assert!(sub.is_traversable());
        assert_eq!(sub.full_path(), dir.path().join("sub"));

        let file = entries.iter().find(|e| e.name == "a.txt").unwrap();
        assert!(file.is_file);
        assert!(!file.is_traversable());
    }

    #[tokio::test]
    async fn test_stat_reports_size_and_kind() {
        let dir = populated_dir().await;
        let provider = TokioFilesystem::new();

        let record = provider.stat(&dir.path().join("b.txt")).await.unwrap();
        assert_eq!(record.size, 5);
        assert!(record.is_file);
        assert!(!record.is_directory);
        assert!(record.modified.is_some());

        let record = provider.stat(dir.path()).await.unwrap();
        assert!(record.is_directory);
    }

    #[tokio::test]
    async fn test_stat_on_missing_path_fails() {
        let dir = TempDir::new().unwrap();
        let provider = TokioFilesystem::new();
        assert!(provider.stat(&dir.path().join("missing")).await.is_err());
    }

    #[tokio::test]
    async fn test_listing_a_file_fails() {
        let dir = populated_dir().await;
        let provider = TokioFilesystem::new();
        assert!(provider
            .list_directory(&dir.path().join("a.txt"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_exists() {
        let dir = populated_dir().await;
        let provider = TokioFilesystem::new();
        assert!(provider.exists(dir.path()).await);
        assert!(provider.exists(&dir.path().join("a.txt")).await);
        assert!(!provider.exists(&dir.path().join("missing")).await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinks_are_listed_as_leaves() {
        let dir = populated_dir().await;
        std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("link")).unwrap();
        let provider = TokioFilesystem::new();

        let entries = provider.list_directory(dir.path()).await.unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_symlink);
        assert!(!link.is_directory);
        assert!(!link.is_traversable());

        // stat follows the link for the target type but keeps the flag.
        let record = provider.stat(&dir.path().join("link")).await.unwrap();
        assert!(record.is_directory);
        assert!(record.is_symlink);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_broken_symlink_stat_degrades() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();
        let provider = TokioFilesystem::new();

        let record = provider.stat(&dir.path().join("dangling")).await.unwrap();
        assert!(record.is_symlink);
        assert!(!record.is_file);
        assert!(!record.is_directory);
    }
}
