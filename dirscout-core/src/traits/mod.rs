//! Core traits for the dirscout engine.
//!
//! This module defines the seams between the traversal engine and its
//! collaborators: filesystem access, filtering, visiting, and error
//! reporting. Implementations plug in behind these traits without the
//! engine knowing their concrete types.

pub mod filter;
pub mod provider;
pub mod reporter;
pub mod visitor;

// Re-export all traits for convenience
pub use filter::*;
pub use provider::*;
pub use reporter::*;
pub use visitor::*;
