//! # Dirscout Core
//!
//! Core traits, types, and interfaces for the dirscout directory-exploration engine.
//!
//! This crate provides the foundational building blocks the traversal engine
//! is assembled from, including:
//!
//! - **Data structures**: `StatRecord`, `FileStats`, `DirectoryEntry`, and `FileNode`
//! - **Core traits**: `FilesystemProvider`, `PathFilter`, `Visitor`, `ErrorReporter`
//! - **Path utilities**: canonical path resolution and derivations
//! - **Error handling**: Comprehensive error types with context
//!
//! ## Quick Start
//!
//! ```rust
//! use dirscout_core::prelude::*;
//!
//! // A normalized listing record and its full path
//! let entry = DirectoryEntry::file("Cargo.toml", "/work/demo");
//! assert_eq!(entry.full_path(), std::path::PathBuf::from("/work/demo/Cargo.toml"));
//! ```
//!
//! ## Architecture
//!
//! The core follows a modular design where every collaborator sits behind a
//! well-defined trait, allowing for easy composition and testing:
//!
//! - **Providers** answer listings, stats, and existence checks
//! - **Filters** decide what gets recorded and where traversal descends
//! - **Visitors** observe recorded nodes and can stop a traversal early
//! - **Error reporters** receive the errors traversal absorbs instead of failing on

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used types and traits
pub mod prelude;

// Core modules
pub mod error;
pub mod path;
pub mod traits;
pub mod types;

// Re-export key types at crate root for convenience
pub use error::{DirscoutError, Result};
pub use types::{DirectoryEntry, FileNode, FileStats, Loaded, NodeKind, StatRecord};

// Re-export traits for convenience
pub use traits::*;

/// Version information for the dirscout core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the dirscout core library.
pub const NAME: &str = env!("CARGO_PKG_NAME");
