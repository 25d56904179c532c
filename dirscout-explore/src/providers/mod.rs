//! Shipped filesystem providers.
//!
//! Two implementations of `FilesystemProvider` come with the engine: the
//! real one backed by `tokio::fs`, and an in-memory one for tests and
//! synthetic trees. Both normalize listings the same way, so code written
//! against one behaves identically on the other.

pub mod memory;
pub mod tokio_fs;

pub use memory::MemoryFilesystem;
pub use tokio_fs::TokioFilesystem;
