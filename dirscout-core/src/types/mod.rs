//! Core data types for the dirscout engine.
//!
//! This module contains the value types traversal is built on: normalized
//! stat snapshots, lazy metadata caches, directory-listing entries, and
//! the traversal-facing file node.

pub mod entry;
pub mod node;
pub mod stats;

// Re-export all types for convenience
pub use entry::*;
pub use node::*;
pub use stats::*;
