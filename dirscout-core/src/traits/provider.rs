//! Filesystem access traits.
//!
//! This module defines the low-level filesystem interface the traversal
//! engine is written against. Everything the engine learns about a tree
//! flows through a provider, so tests and embedders can substitute
//! in-memory or remote filesystems without touching the engine.

use async_trait::async_trait;
use std::path::Path;

use crate::{DirectoryEntry, Result, StatRecord};

/// Read-only access to a filesystem tree.
///
/// Implementations normalize platform answers into [`DirectoryEntry`] and
/// [`StatRecord`] values up front; consumers never inspect raw OS
/// structures. Listings should be deterministic for a given tree state so
/// traversal order is reproducible.
///
/// # Examples
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use dirscout_core::traits::FilesystemProvider;
/// use dirscout_core::{DirectoryEntry, Result, StatRecord};
/// use std::path::Path;
///
/// #[derive(Debug)]
/// struct EmptyProvider;
///
/// #[async_trait]
/// impl FilesystemProvider for EmptyProvider {
///     async fn list_directory(&self, _path: &Path) -> Result<Vec<DirectoryEntry>> {
///         Ok(Vec::new())
///     }
///
///     async fn stat(&self, _path: &Path) -> Result<StatRecord> {
///         Ok(StatRecord::directory())
///     }
///
///     async fn exists(&self, _path: &Path) -> bool {
///         false
///     }
/// }
/// ```
#[async_trait]
pub trait FilesystemProvider: Send + Sync + std::fmt::Debug {
    /// List the immediate children of a directory.
    ///
    /// Entry flags describe each child without following symlinks, so a
    /// link to a directory is still reported as a link.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be read as a directory. The
    /// engine degrades this to an empty listing and keeps going.
    async fn list_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>>;

    /// Fetch metadata for a single path.
    ///
    /// Symlinks are followed for size, timestamps, and the target type;
    /// `is_symlink` still reports on the link itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be stat'ed, typically because
    /// it vanished between listing and stat.
    async fn stat(&self, path: &Path) -> Result<StatRecord>;

    /// Whether the path currently exists. Lookup failures count as absent.
    async fn exists(&self, path: &Path) -> bool;

    /// Get a human-readable name for this provider.
    ///
    /// This is used for logging and debugging purposes.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
