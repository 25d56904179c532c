//! Metadata snapshots and the lazy stat cache.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::traits::FilesystemProvider;

/// A lazily-loaded metadata field.
///
/// Distinguishes "never asked" from "asked and the answer does not exist",
/// so a failed or partial stat is not retried on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loaded<T> {
    /// The field has not been fetched yet.
    Pending,
    /// The field was fetched successfully.
    Value(T),
    /// The field was fetched but the provider could not supply it.
    Unavailable,
}

impl<T> Loaded<T> {
    /// Whether the field still needs a fetch.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Loaded::Pending)
    }

    /// The cached value, if one was fetched.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Loaded::Value(value) => Some(value),
            Loaded::Pending | Loaded::Unavailable => None,
        }
    }
}

impl<T: Copy> Loaded<T> {
    /// The cached value by copy, or `default` when absent.
    #[must_use]
    pub fn value_or(&self, default: T) -> T {
        match self {
            Loaded::Value(value) => *value,
            Loaded::Pending | Loaded::Unavailable => default,
        }
    }
}

/// The normalized result of a single `stat` call.
///
/// Providers do all shape normalization up front: consumers read plain
/// fields and never sniff provider-specific structures. Timestamps are
/// optional because not every filesystem reports all three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    /// Size in bytes. Zero for directories on most filesystems.
    pub size: u64,
    /// Creation time, when the filesystem tracks it.
    pub created: Option<SystemTime>,
    /// Last modification time.
    pub modified: Option<SystemTime>,
    /// Last access time.
    pub accessed: Option<SystemTime>,
    /// The path refers to a regular file (the symlink target's type when
    /// the path is a link).
    pub is_file: bool,
    /// The path refers to a directory.
    pub is_directory: bool,
    /// The path itself is a symbolic link.
    pub is_symlink: bool,
}

impl StatRecord {
    /// A regular file of the given size.
    #[must_use]
    pub fn file(size: u64) -> Self {
        Self {
            size,
            is_file: true,
            ..Self::default()
        }
    }

    /// A directory.
    #[must_use]
    pub fn directory() -> Self {
        Self {
            is_directory: true,
            ..Self::default()
        }
    }

    /// A symlink whose target is a regular file of the given size.
    #[must_use]
    pub fn symlink_to_file(size: u64) -> Self {
        Self {
            size,
            is_file: true,
            is_symlink: true,
            ..Self::default()
        }
    }

    /// A symlink whose target is a directory.
    #[must_use]
    pub fn symlink_to_directory() -> Self {
        Self {
            is_directory: true,
            is_symlink: true,
            ..Self::default()
        }
    }

    /// Set the creation time.
    #[must_use]
    pub fn with_created(mut self, created: SystemTime) -> Self {
        self.created = Some(created);
        self
    }

    /// Set the modification time.
    #[must_use]
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Set the access time.
    #[must_use]
    pub fn with_accessed(mut self, accessed: SystemTime) -> Self {
        self.accessed = Some(accessed);
        self
    }
}

/// Cached metadata for one filesystem path.
///
/// Size and timestamps start out [`Loaded::Pending`] and are filled by a
/// single `stat` call on first read; a failed stat marks them
/// [`Loaded::Unavailable`] so repeated reads never hammer a broken path.
/// The type flags are pinned at construction and survive refreshes.
#[derive(Debug, Clone)]
pub struct FileStats {
    path: PathBuf,
    provider: Arc<dyn FilesystemProvider>,
    is_file: bool,
    is_directory: bool,
    is_symlink: bool,
    size: Loaded<u64>,
    created: Loaded<SystemTime>,
    modified: Loaded<SystemTime>,
    accessed: Loaded<SystemTime>,
}

impl FileStats {
    /// Stats for a path whose type is already known (from a directory
    /// listing) but whose metadata has not been fetched yet.
    #[must_use]
    pub fn pending(
        provider: Arc<dyn FilesystemProvider>,
        path: impl Into<PathBuf>,
        is_file: bool,
        is_directory: bool,
        is_symlink: bool,
    ) -> Self {
        Self {
            path: path.into(),
            provider,
            is_file,
            is_directory,
            is_symlink,
            size: Loaded::Pending,
            created: Loaded::Pending,
            modified: Loaded::Pending,
            accessed: Loaded::Pending,
        }
    }

    /// Stats pre-filled from a completed `stat` call.
    #[must_use]
    pub fn from_record(
        provider: Arc<dyn FilesystemProvider>,
        path: impl Into<PathBuf>,
        record: &StatRecord,
    ) -> Self {
        let mut stats = Self::pending(
            provider,
            path,
            record.is_file,
            record.is_directory,
            record.is_symlink,
        );
        stats.overwrite_from(record);
        stats
    }

    /// The path these stats describe.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the path is a regular file (pinned at construction).
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.is_file
    }

    /// Whether the path is a directory (pinned at construction).
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Whether the path itself is a symbolic link (pinned at construction).
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    /// Size in bytes, fetching lazily. Degrades to `0` when the stat fails
    /// or the field never loads.
    pub async fn size(&mut self) -> u64 {
        self.ensure_loaded().await;
        self.size.value_or(0)
    }

    /// Creation time, fetching lazily. `None` when unavailable.
    pub async fn created(&mut self) -> Option<SystemTime> {
        self.ensure_loaded().await;
        self.created.value().copied()
    }

    /// Modification time, fetching lazily. `None` when unavailable.
    pub async fn modified(&mut self) -> Option<SystemTime> {
        self.ensure_loaded().await;
        self.modified.value().copied()
    }

    /// Access time, fetching lazily. `None` when unavailable.
    pub async fn accessed(&mut self) -> Option<SystemTime> {
        self.ensure_loaded().await;
        self.accessed.value().copied()
    }

    /// Re-stat the path and replace every cached field.
    ///
    /// Unlike the lazy accessors, a failure here is returned to the caller:
    /// whoever asks for a refresh explicitly wants to know it did not
    /// happen. Type flags are not touched.
    pub async fn refresh(&mut self) -> Result<()> {
        let record = self.provider.stat(&self.path).await?;
        self.overwrite_from(&record);
        Ok(())
    }

    /// The cached size without triggering I/O. Defaults to `0`.
    #[must_use]
    pub fn cached_size(&self) -> u64 {
        self.size.value_or(0)
    }

    /// The cached creation time without triggering I/O.
    #[must_use]
    pub fn cached_created(&self) -> Option<SystemTime> {
        self.created.value().copied()
    }

    /// Fetch metadata once if any field is still pending. A failure
    /// demotes the pending fields to [`Loaded::Unavailable`]; the error is
    /// deliberately not surfaced here because lazy reads degrade.
    async fn ensure_loaded(&mut self) {
        if !self.has_pending() {
            return;
        }
        match self.provider.stat(&self.path).await {
            Ok(record) => self.fill_pending_from(&record),
            Err(error) => {
                debug!(
                    "Failed to stat {}, degrading metadata: {}",
                    self.path.display(),
                    error
                );
                self.mark_pending_unavailable();
            }
        }
    }

    fn has_pending(&self) -> bool {
        self.size.is_pending()
            || self.created.is_pending()
            || self.modified.is_pending()
            || self.accessed.is_pending()
    }

    fn fill_pending_from(&mut self, record: &StatRecord) {
        if self.size.is_pending() {
            self.size = Loaded::Value(record.size);
        }
        if self.created.is_pending() {
            self.created = loaded_from(record.created);
        }
        if self.modified.is_pending() {
            self.modified = loaded_from(record.modified);
        }
        if self.accessed.is_pending() {
            self.accessed = loaded_from(record.accessed);
        }
    }

    fn overwrite_from(&mut self, record: &StatRecord) {
        self.size = Loaded::Value(record.size);
        self.created = loaded_from(record.created);
        self.modified = loaded_from(record.modified);
        self.accessed = loaded_from(record.accessed);
    }

    fn mark_pending_unavailable(&mut self) {
        for field in [&mut self.created, &mut self.modified, &mut self.accessed] {
            if field.is_pending() {
                *field = Loaded::Unavailable;
            }
        }
        if self.size.is_pending() {
            self.size = Loaded::Unavailable;
        }
    }
}

fn loaded_from<T>(value: Option<T>) -> Loaded<T> {
    value.map_or(Loaded::Unavailable, Loaded::Value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DirscoutError;
    use crate::types::DirectoryEntry;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed record (or a failure) and counts stat calls.
    #[derive(Debug)]
    struct StubProvider {
        record: Option<StatRecord>,
        stat_calls: AtomicUsize,
    }

    impl StubProvider {
        fn with_record(record: StatRecord) -> Arc<Self> {
            Arc::new(Self {
                record: Some(record),
                stat_calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                record: None,
                stat_calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.stat_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FilesystemProvider for StubProvider {
        async fn list_directory(&self, _path: &Path) -> Result<Vec<DirectoryEntry>> {
            Ok(Vec::new())
        }

        async fn stat(&self, path: &Path) -> Result<StatRecord> {
            self.stat_calls.fetch_add(1, Ordering::SeqCst);
            self.record
                .ok_or_else(|| DirscoutError::provider(format!("no stats for {}", path.display())))
        }

        async fn exists(&self, _path: &Path) -> bool {
            self.record.is_some()
        }
    }

    #[tokio::test]
    async fn test_single_stat_fills_every_field() {
        let now = SystemTime::now();
        let provider = StubProvider::with_record(
            StatRecord::file(42).with_created(now).with_modified(now),
        );
        let mut stats = FileStats::pending(provider.clone(), "/f.txt", true, false, false);

        assert_eq!(stats.size().await, 42);
        assert_eq!(stats.created().await, Some(now));
        assert_eq!(stats.modified().await, Some(now));
        assert_eq!(stats.accessed().await, None);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_stat_degrades_and_never_retries() {
        let provider = StubProvider::failing();
        let mut stats = FileStats::pending(provider.clone(), "/gone", true, false, false);

        assert_eq!(stats.size().await, 0);
        assert_eq!(stats.created().await, None);
        assert_eq!(stats.size().await, 0);
        assert_eq!(provider.calls(), 1);

        // The type flags came from the listing and stay authoritative.
        assert!(stats.is_file());
        assert!(!stats.is_directory());
    }

    #[tokio::test]
    async fn test_refresh_propagates_errors() {
        let provider = StubProvider::failing();
        let mut stats = FileStats::pending(provider, "/gone", true, false, false);
        assert!(stats.refresh().await.is_err());
    }

    #[tokio::test]
    async fn test_refresh_overwrites_cached_fields() {
        let provider = StubProvider::with_record(StatRecord::file(7));
        let mut stats =
            FileStats::from_record(provider.clone(), "/f.txt", &StatRecord::file(1));

        assert_eq!(stats.cached_size(), 1);
        stats.refresh().await.unwrap();
        assert_eq!(stats.cached_size(), 7);
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_cached_peeks_do_no_io() {
        let provider = StubProvider::with_record(StatRecord::file(9));
        let stats = FileStats::pending(provider.clone(), "/f.txt", true, false, false);

        assert_eq!(stats.cached_size(), 0);
        assert_eq!(stats.cached_created(), None);
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_record_constructors() {
        let link = StatRecord::symlink_to_directory();
        assert!(link.is_directory);
        assert!(link.is_symlink);
        assert!(!link.is_file);

        let file = StatRecord::file(16);
        assert_eq!(file.size, 16);
        assert!(file.is_file);
        assert!(!file.is_symlink);
    }
}
