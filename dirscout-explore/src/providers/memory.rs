//! In-memory filesystem provider.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use dirscout_core::{
    path as core_path, DirectoryEntry, DirscoutError, FilesystemProvider, Result, StatRecord,
};

/// A filesystem that lives entirely in memory.
///
/// Built for tests and embedders that want traversal over synthetic trees:
/// populate it with the `add_*` builders, then hand it to the explorer
/// like any other provider. Failures can be injected per path to exercise
/// degradation, and listing attempts are counted per directory so tests
/// can assert a pruned directory was never listed.
///
/// All paths are canonicalized on the way in, and ancestors of an added
/// path are created as directories automatically.
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<PathBuf, StatRecord>,
    failing_listings: HashSet<PathBuf>,
    failing_stats: HashSet<PathBuf>,
    listing_counts: HashMap<PathBuf, usize>,
}

impl MemoryFilesystem {
    /// Create an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory, creating missing ancestors.
    pub fn add_directory(&self, path: impl AsRef<Path>) -> &Self {
        self.insert_with_ancestors(path.as_ref(), StatRecord::directory());
        self
    }

    /// Add a regular file of the given size, creating missing ancestors.
    pub fn add_file(&self, path: impl AsRef<Path>, size: u64) -> &Self {
        self.insert_with_ancestors(path.as_ref(), StatRecord::file(size));
        self
    }

    /// Add a symlink leaf, creating missing ancestors.
    pub fn add_symlink(&self, path: impl AsRef<Path>) -> &Self {
        self.insert_with_ancestors(path.as_ref(), StatRecord::symlink_to_file(0));
        self
    }

    /// Add a path with a fully custom stat record, creating missing
    /// ancestors. Useful for controlling timestamps.
    pub fn add_record(&self, path: impl AsRef<Path>, record: StatRecord) -> &Self {
        self.insert_with_ancestors(path.as_ref(), record);
        self
    }

    /// Make every listing of this directory fail.
    pub fn fail_listing(&self, path: impl AsRef<Path>) -> &Self {
        let path = core_path::resolve([path.as_ref()]);
        self.lock().failing_listings.insert(path);
        self
    }

    /// Make every stat of this path fail. The path still shows up in its
    /// parent's listing, which is how a vanished entry looks.
    pub fn fail_stat(&self, path: impl AsRef<Path>) -> &Self {
        let path = core_path::resolve([path.as_ref()]);
        self.lock().failing_stats.insert(path);
        self
    }

    /// How many times the directory has been asked for a listing,
    /// including attempts that failed.
    #[must_use]
    pub fn listing_count(&self, path: impl AsRef<Path>) -> usize {
        let path = core_path::resolve([path.as_ref()]);
        self.lock().listing_counts.get(&path).copied().unwrap_or(0)
    }

    fn insert_with_ancestors(&self, path: &Path, record: StatRecord) {
        let path = core_path::resolve([path]);
        let mut inner = self.lock();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            inner
                .records
                .entry(ancestor.to_path_buf())
                .or_insert_with(StatRecord::directory);
        }
        inner.records.insert(path, record);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl FilesystemProvider for MemoryFilesystem {
    async fn list_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        let path = core_path::resolve([path]);
        let mut inner = self.lock();

        *inner.listing_counts.entry(path.clone()).or_insert(0) += 1;

        if inner.failing_listings.contains(&path) {
            return Err(DirscoutError::provider(format!(
                "injected listing failure for {}",
                path.display()
            )));
        }

        let record = inner.records.get(&path).copied().ok_or_else(|| {
            DirscoutError::provider(format!("no such directory: {}", path.display()))
        })?;
        if !record.is_directory {
            return Err(DirscoutError::provider(format!(
                "not a directory: {}",
                path.display()
            )));
        }

        let mut entries: Vec<DirectoryEntry> = inner
            .records
            .iter()
            .filter(|(child, _)| child.parent() == Some(path.as_path()))
            .filter_map(|(child, record)| {
                let name = child.file_name()?.to_string_lossy().into_owned();
                Some(if record.is_symlink {
                    DirectoryEntry::symlink(name, &path)
                } else if record.is_directory {
                    DirectoryEntry::directory(name, &path)
                } else {
                    DirectoryEntry::file(name, &path)
                })
            })
            .collect();

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn stat(&self, path: &Path) -> Result<StatRecord> {
        let path = core_path::resolve([path]);
        let inner = self.lock();

        if inner.failing_stats.contains(&path) {
            return Err(DirscoutError::provider(format!(
                "injected stat failure for {}",
                path.display()
            )));
        }

        inner
            .records
            .get(&path)
            .copied()
            .ok_or_else(|| DirscoutError::provider(format!("no such path: {}", path.display())))
    }

    async fn exists(&self, path: &Path) -> bool {
        let path = core_path::resolve([path]);
        self.lock().records.contains_key(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_listing_is_sorted_and_flagged() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/r/b.txt", 2)
            .add_directory("/r/sub")
            .add_file("/r/a.txt", 1)
            .add_symlink("/r/link");

        let entries = fs.list_directory(Path::new("/r")).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt", "link", "sub"]);

        assert!(entries[3].is_traversable());
        assert!(entries[2].is_symlink);
        assert!(!entries[2].is_traversable());
    }

    #[tokio::test]
    async fn test_ancestors_are_created() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/a/b/c/deep.txt", 4);

        assert!(fs.exists(Path::new("/a")).await);
        assert!(fs.exists(Path::new("/a/b/c")).await);
        let record = fs.stat(Path::new("/a/b")).await.unwrap();
        assert!(record.is_directory);
    }

    #[tokio::test]
    async fn test_injected_listing_failure_counts_the_attempt() {
        let fs = MemoryFilesystem::new();
        fs.add_directory("/r/locked").fail_listing("/r/locked");

        assert_eq!(fs.listing_count("/r/locked"), 0);
        assert!(fs.list_directory(Path::new("/r/locked")).await.is_err());
        assert_eq!(fs.listing_count("/r/locked"), 1);
    }

    #[tokio::test]
    async fn test_injected_stat_failure_still_lists_the_entry() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/r/ghost.txt", 1).fail_stat("/r/ghost.txt");

        let entries = fs.list_directory(Path::new("/r")).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(fs.stat(Path::new("/r/ghost.txt")).await.is_err());
    }

    #[tokio::test]
    async fn test_listing_a_file_fails() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/r/a.txt", 1);
        assert!(fs.list_directory(Path::new("/r/a.txt")).await.is_err());
    }
}
