//! Normalized directory-listing records.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One entry of a directory listing, as reported by a provider.
///
/// `name` is always a base name, never a path; the entry's full path is
/// reproduced by joining `parent` and `name`. The type flags describe the
/// entry itself, without following links: a symlink reports
/// `is_symlink = true` and both `is_file` and `is_directory` false, so the
/// traversal engine can treat links as leaves regardless of target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Base name of the entry.
    pub name: String,
    /// The directory the entry was listed from.
    pub parent: PathBuf,
    /// The entry is a regular file.
    pub is_file: bool,
    /// The entry is a directory.
    pub is_directory: bool,
    /// The entry is a symbolic link.
    pub is_symlink: bool,
}

impl DirectoryEntry {
    /// A regular-file entry.
    #[must_use]
    pub fn file(name: impl Into<String>, parent: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            is_file: true,
            is_directory: false,
            is_symlink: false,
        }
    }

    /// A directory entry.
    #[must_use]
    pub fn directory(name: impl Into<String>, parent: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            is_file: false,
            is_directory: true,
            is_symlink: false,
        }
    }

    /// A symlink entry. Both type flags are false: links are leaves to the
    /// traversal engine even when their target is a directory.
    #[must_use]
    pub fn symlink(name: impl Into<String>, parent: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            is_file: false,
            is_directory: false,
            is_symlink: true,
        }
    }

    /// The entry's full path: `parent` joined with `name`.
    #[must_use]
    pub fn full_path(&self) -> PathBuf {
        self.parent.join(&self.name)
    }

    /// Whether the entry should be descended into during traversal.
    /// Only plain directories qualify; symlinked directories are leaves.
    #[must_use]
    pub fn is_traversable(&self) -> bool {
        self.is_directory && !self.is_symlink
    }
}
