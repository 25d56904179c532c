//! # Dirscout - Async Directory Exploration
//!
//! Dirscout walks filesystem trees asynchronously, classifying every entry,
//! filtering what gets recorded and where traversal descends, and handing
//! matches to visitor callbacks that can stop a run early. Concurrent
//! traversals are bounded by a session registry.
//!
//! ## Quick Start
//!
//! ```rust
//! use dirscout::prelude::*;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! // Build a synthetic tree and collect everything under it.
//! let fs = Arc::new(MemoryFilesystem::new());
//! fs.add_file("/tree/readme.md", 64)
//!     .add_file("/tree/docs/guide.md", 128);
//!
//! let explorer = DirectoryExplorer::new(fs);
//! let nodes = explorer.collect("/tree", ExploreOptions::new()).await.unwrap();
//! assert_eq!(nodes.len(), 4);
//! # });
//! ```
//!
//! ## Architecture
//!
//! The workspace is organized into two modules:
//!
//! - **dirscout-core**: Core traits, types, and path utilities
//! - **dirscout-explore**: The traversal engine, providers, filters,
//!   visitors, and session management

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export all public APIs from sub-crates
pub use dirscout_core as core;
pub use dirscout_explore as explore;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and traits
/// from all dirscout modules.
pub mod prelude {
    // Re-export the explore prelude, which includes the core surface
    pub use dirscout_explore::prelude::*;
}

/// Version information for the dirscout framework.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
