//! Directory traversal engine for the dirscout framework.
//!
//! This crate provides the exploration machinery built on top of
//! `dirscout-core`. It includes:
//!
//! - **The explorer**: breadth-first and depth-first traversal with
//!   inclusion and descent filtering, visitor callbacks, and early stop
//! - **Providers**: the real filesystem via `tokio::fs` and an in-memory
//!   tree for tests and embedders
//! - **Filters and visitors**: name, extension, and exclusion filters,
//!   closure adapters, and a stop-after-N visitor
//! - **Sessions**: a bounded registry keeping concurrent traversals in
//!   check
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dirscout_explore::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let explorer = DirectoryExplorer::new(Arc::new(TokioFilesystem::new()));
//!
//!     // Find every Cargo.toml outside of target/, breadth-first.
//!     let options = ExploreOptions::new()
//!         .with_file_filter(Arc::new(NameFilter::new("Cargo.toml")))
//!         .with_directory_filter(Arc::new(ExcludeNames::new(["target"])))
//!         .with_strategy(TraversalStrategy::BreadthFirst);
//!
//!     let manifests = explorer.collect("/work/projects", options).await?;
//!     for node in &manifests {
//!         println!("{}", node.path().display());
//!     }
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod explorer;
pub mod filters;
pub mod providers;
pub mod reporting;
pub mod session;
pub mod state;
pub mod visitors;

// Re-export the engine surface at the crate root for convenience
pub use crate::explorer::{
    DirectoryExplorer, DirectoryExplorerBuilder, ExploreOptions, ExplorerConfig, FindOptions,
};
pub use crate::state::{ExplorationState, ExploreStats, TraversalStrategy};

/// Re-export commonly used types and traits.
pub mod prelude {
    // Re-export our own error types
    pub use crate::error::{ExploreError, Result as ExploreResult};

    // Re-export the engine surface
    pub use crate::explorer::{
        DirectoryExplorer, DirectoryExplorerBuilder, ExploreOptions, ExplorerConfig, FindOptions,
    };
    pub use crate::state::{ExplorationState, ExploreStats, TraversalStrategy};

    // Re-export filters, visitors, providers, and reporters
    pub use crate::filters::{ExcludeNames, ExtensionFilter, FilterFn, NameFilter};
    pub use crate::providers::{MemoryFilesystem, TokioFilesystem};
    pub use crate::reporting::{CollectingReporter, ReportedError, TracingReporter};
    pub use crate::session::{
        SessionGuard, SessionInfo, SessionRegistry, DEFAULT_SESSION_CAPACITY,
    };
    pub use crate::visitors::{StopAfter, VisitFn};

    // Re-export core types (avoid conflicts)
    pub use dirscout_core::{
        path, AcceptAll, AcceptNone, AllOf, DirectoryEntry, DirscoutError, ErrorReporter,
        FileNode, FileStats, FilesystemProvider, Loaded, NeverStop, NodeKind, PathFilter,
        Result as CoreResult, StatRecord, Visitor,
    };
}
