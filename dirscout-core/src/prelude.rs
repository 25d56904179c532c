//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits
//! from the dirscout core library for easy importing.
//!
//! # Examples
//!
//! ```rust
//! use dirscout_core::prelude::*;
//!
//! // Now you can use all the common types and traits
//! let entry = DirectoryEntry::file("notes.txt", "/home/amy");
//! let record = StatRecord::file(1024);
//! ```

// Re-export core error types
pub use crate::error::{DirscoutError, Result};

// Re-export all data types
pub use crate::types::{
    // Listing types
    DirectoryEntry,
    // Node types
    FileNode,
    NodeKind,
    // Metadata types
    FileStats,
    Loaded,
    StatRecord,
};

// Re-export core traits and their stock implementations
pub use crate::traits::{
    AcceptAll, AcceptNone, AllOf, ErrorReporter, FilesystemProvider, NeverStop, PathFilter,
    Visitor,
};

// Re-export path utilities as a module
pub use crate::path;
