//! The traversal-facing view of one filesystem path.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::Result;
use crate::path;
use crate::traits::FilesystemProvider;
use crate::types::{DirectoryEntry, FileStats};

/// What a node is, decided once when the node is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A regular file, or any non-directory leaf (symlinks included).
    File,
    /// A directory that can be descended into.
    Directory,
}

/// One filesystem path as seen during traversal.
///
/// The canonical path is the node's identity: equality and hashing look at
/// nothing else, so nodes from different traversals of the same tree
/// compare equal. The kind is pinned at construction and never
/// re-evaluated, even across [`refresh`](FileNode::refresh): a node built
/// as a directory stays a directory for consumers holding it.
///
/// A node with no kind is the not-found sentinel returned in place of an
/// error when a lookup target does not exist; it answers `false` to both
/// kind queries and defaults on every metadata accessor.
#[derive(Debug, Clone)]
pub struct FileNode {
    path: PathBuf,
    kind: Option<NodeKind>,
    symlink: bool,
    stats: Option<FileStats>,
    entry: Option<DirectoryEntry>,
}

impl FileNode {
    /// Build a node from already-fetched stats.
    ///
    /// The path is canonicalized; classification comes from the stats. A
    /// blank path cannot name anything, so `default_if_invalid` (typically
    /// [`FileNode::not_found`]) is returned instead.
    #[must_use]
    pub fn from_stats(
        path: impl AsRef<Path>,
        stats: FileStats,
        entry: Option<DirectoryEntry>,
        default_if_invalid: FileNode,
    ) -> FileNode {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return default_if_invalid;
        }
        let kind = if stats.is_directory() {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        FileNode {
            path: path::resolve([path]),
            kind: Some(kind),
            symlink: stats.is_symlink(),
            stats: Some(stats),
            entry,
        }
    }

    /// Build a node from a directory-listing entry, with metadata left
    /// lazy. Classification uses the entry's own flags, so a symlink is a
    /// leaf regardless of what it points at.
    #[must_use]
    pub fn from_entry(provider: Arc<dyn FilesystemProvider>, entry: &DirectoryEntry) -> FileNode {
        let full_path = path::resolve([entry.full_path()]);
        let kind = if entry.is_traversable() {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        let stats = FileStats::pending(
            provider,
            full_path.clone(),
            entry.is_file,
            entry.is_directory,
            entry.is_symlink,
        );
        FileNode {
            path: full_path,
            kind: Some(kind),
            symlink: entry.is_symlink,
            stats: Some(stats),
            entry: Some(entry.clone()),
        }
    }

    /// Build a node for a path already known to be a directory, such as a
    /// traversal root. Metadata stays lazy.
    #[must_use]
    pub fn directory(provider: Arc<dyn FilesystemProvider>, path: impl AsRef<Path>) -> FileNode {
        let path = path::resolve([path.as_ref()]);
        let stats = FileStats::pending(provider, path.clone(), false, true, false);
        FileNode {
            path,
            kind: Some(NodeKind::Directory),
            symlink: false,
            stats: Some(stats),
            entry: None,
        }
    }

    /// The sentinel standing in for a path that does not exist.
    #[must_use]
    pub fn not_found() -> FileNode {
        FileNode {
            path: PathBuf::new(),
            kind: None,
            symlink: false,
            stats: None,
            entry: None,
        }
    }

    /// The canonical path. Empty for the sentinel.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The base name of the path, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        path::base_name(&self.path)
    }

    /// The extension of the base name, without the leading dot.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        path::extension(&self.path)
    }

    /// The node's pinned kind. `None` for the sentinel.
    #[must_use]
    pub fn kind(&self) -> Option<NodeKind> {
        self.kind
    }

    /// Whether this node was pinned as a file. The sentinel answers false.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == Some(NodeKind::File)
    }

    /// Whether this node was pinned as a directory. The sentinel answers
    /// false.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.kind == Some(NodeKind::Directory)
    }

    /// Whether the underlying path is a symbolic link.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.symlink
    }

    /// Whether this is the not-found sentinel.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind.is_none()
    }

    /// The listing entry this node was built from, when it came from a
    /// listing.
    #[must_use]
    pub fn entry(&self) -> Option<&DirectoryEntry> {
        self.entry.as_ref()
    }

    /// The metadata layer, for callers that want cached peeks.
    #[must_use]
    pub fn stats(&self) -> Option<&FileStats> {
        self.stats.as_ref()
    }

    /// Size in bytes, fetched lazily. Degrades to `0` on stat failure and
    /// for the sentinel.
    pub async fn size(&mut self) -> u64 {
        match &mut self.stats {
            Some(stats) => stats.size().await,
            None => 0,
        }
    }

    /// Creation time, fetched lazily. `None` when unavailable.
    pub async fn created(&mut self) -> Option<SystemTime> {
        match &mut self.stats {
            Some(stats) => stats.created().await,
            None => None,
        }
    }

    /// Modification time, fetched lazily. `None` when unavailable.
    pub async fn modified(&mut self) -> Option<SystemTime> {
        match &mut self.stats {
            Some(stats) => stats.modified().await,
            None => None,
        }
    }

    /// Access time, fetched lazily. `None` when unavailable.
    pub async fn accessed(&mut self) -> Option<SystemTime> {
        match &mut self.stats {
            Some(stats) => stats.accessed().await,
            None => None,
        }
    }

    /// Re-stat the path and replace the cached metadata. A no-op for the
    /// sentinel. The pinned kind is not revisited.
    pub async fn refresh(&mut self) -> Result<()> {
        match &mut self.stats {
            Some(stats) => stats.refresh().await,
            None => Ok(()),
        }
    }

    /// The cached creation time without triggering I/O.
    #[must_use]
    pub fn cached_created(&self) -> Option<SystemTime> {
        self.stats.as_ref().and_then(FileStats::cached_created)
    }

    /// The cached size without triggering I/O.
    #[must_use]
    pub fn cached_size(&self) -> u64 {
        self.stats.as_ref().map_or(0, FileStats::cached_size)
    }

    /// Total order over nodes: cached creation time first, with missing
    /// timestamps ordering before any present one, then the path as a
    /// lexicographic tie-breaker. Never triggers I/O.
    #[must_use]
    pub fn compare(&self, other: &FileNode) -> Ordering {
        self.cached_created()
            .cmp(&other.cached_created())
            .then_with(|| self.path.cmp(&other.path))
    }

    /// Sort nodes oldest first (missing timestamps first), paths breaking
    /// ties.
    pub fn sort(nodes: &mut [FileNode]) {
        nodes.sort_by(FileNode::compare);
    }

    /// Sort nodes in exactly the reverse of [`FileNode::sort`].
    pub fn sort_descending(nodes: &mut [FileNode]) {
        nodes.sort_by(|a, b| b.compare(a));
    }
}

impl PartialEq for FileNode {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FileNode {}

impl Hash for FileNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DirscoutError;
    use crate::types::StatRecord;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[derive(Debug)]
    struct StubProvider {
        record: Option<StatRecord>,
    }

    impl StubProvider {
        fn new(record: StatRecord) -> Arc<Self> {
            Arc::new(Self {
                record: Some(record),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { record: None })
        }
    }

    #[async_trait]
    impl FilesystemProvider for StubProvider {
        async fn list_directory(&self, _path: &Path) -> Result<Vec<DirectoryEntry>> {
            Ok(Vec::new())
        }

        async fn stat(&self, path: &Path) -> Result<StatRecord> {
            self.record
                .ok_or_else(|| DirscoutError::provider(format!("no stats for {}", path.display())))
        }

        async fn exists(&self, _path: &Path) -> bool {
            self.record.is_some()
        }
    }

    fn node_with_created(path: &str, created: Option<SystemTime>) -> FileNode {
        let mut record = StatRecord::file(1);
        record.created = created;
        let provider = StubProvider::new(record);
        let stats = FileStats::from_record(provider, path, &record);
        FileNode::from_stats(path, stats, None, FileNode::not_found())
    }

    #[test]
    fn test_sentinel_defaults() {
        let sentinel = FileNode::not_found();
        assert!(sentinel.is_not_found());
        assert!(!sentinel.is_file());
        assert!(!sentinel.is_directory());
        assert_eq!(sentinel.name(), None);
        assert_eq!(sentinel.cached_size(), 0);
    }

    #[test]
    fn test_blank_path_yields_the_fallback() {
        let provider = StubProvider::new(StatRecord::file(3));
        let stats = FileStats::from_record(provider, "", &StatRecord::file(3));
        let node = FileNode::from_stats("", stats, None, FileNode::not_found());
        assert!(node.is_not_found());
    }

    #[tokio::test]
    async fn test_sentinel_metadata_defaults() {
        let mut sentinel = FileNode::not_found();
        assert_eq!(sentinel.size().await, 0);
        assert_eq!(sentinel.created().await, None);
        assert!(sentinel.refresh().await.is_ok());
    }

    #[tokio::test]
    async fn test_kind_is_pinned_across_refresh() {
        // The provider insists the path is a file; the node was built as a
        // directory and must stay one.
        let provider = StubProvider::new(StatRecord::file(10));
        let mut node = FileNode::directory(provider, "/srv/data");

        node.refresh().await.unwrap();
        assert!(node.is_directory());
        assert!(!node.is_file());
        assert_eq!(node.size().await, 10);
    }

    #[test]
    fn test_symlink_entries_become_leaves() {
        let provider = StubProvider::failing();
        let entry = DirectoryEntry::symlink("link", "/r");
        let node = FileNode::from_entry(provider, &entry);

        assert!(node.is_file());
        assert!(node.is_symlink());
        assert!(!node.is_directory());
        assert_eq!(node.path(), Path::new("/r/link"));
    }

    #[test]
    fn test_equality_is_by_path_only() {
        let a = node_with_created("/r/a.txt", Some(SystemTime::UNIX_EPOCH));
        let b = node_with_created("/r/a.txt", None);
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_sort_orders_by_created_then_path() {
        let epoch = SystemTime::UNIX_EPOCH;
        let later = epoch + Duration::from_secs(60);
        let mut nodes = vec![
            node_with_created("/r/c", Some(later)),
            node_with_created("/r/b", Some(epoch)),
            node_with_created("/r/a", Some(epoch)),
            node_with_created("/r/z", None),
        ];

        FileNode::sort(&mut nodes);
        let paths: Vec<_> = nodes.iter().map(|n| n.path().to_path_buf()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/r/z"),
                PathBuf::from("/r/a"),
                PathBuf::from("/r/b"),
                PathBuf::from("/r/c"),
            ]
        );
    }

    #[test]
    fn test_sort_descending_is_the_exact_reverse() {
        let epoch = SystemTime::UNIX_EPOCH;
        let mut ascending = vec![
            node_with_created("/r/b", Some(epoch)),
            node_with_created("/r/a", None),
            node_with_created("/r/c", Some(epoch + Duration::from_secs(5))),
        ];
        let mut descending = ascending.clone();

        FileNode::sort(&mut ascending);
        FileNode::sort_descending(&mut descending);
        ascending.reverse();
        assert_eq!(ascending, descending);
    }
}
