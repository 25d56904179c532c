//! Traversal visitor trait.

use async_trait::async_trait;

use crate::{FileNode, Result};

/// A callback invoked for every node a traversal records.
///
/// Returning `Ok(true)` stops the traversal immediately; results collected
/// so far are returned to the caller. Returning an error aborts the
/// traversal with that error. Visitors take `&self` and are shared across
/// await points, so mutable state belongs in interior atomics or locks.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use dirscout_core::traits::Visitor;
/// use dirscout_core::{FileNode, Result};
///
/// /// Stops as soon as anything larger than a megabyte shows up.
/// #[derive(Debug)]
/// struct BailOnLarge;
///
/// #[async_trait]
/// impl Visitor for BailOnLarge {
///     async fn visit(&self, node: &FileNode) -> Result<bool> {
///         Ok(node.cached_size() > 1_000_000)
///     }
/// }
/// ```
#[async_trait]
pub trait Visitor: Send + Sync + std::fmt::Debug {
    /// Observe a recorded node. `Ok(true)` requests traversal stop.
    ///
    /// # Errors
    ///
    /// Returns an error when the visitor cannot process the node; the
    /// traversal aborts with it.
    async fn visit(&self, node: &FileNode) -> Result<bool>;

    /// Get a human-readable name for this visitor.
    ///
    /// This is used for logging and debugging purposes.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// The default visitor: observes everything and never stops.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

#[async_trait]
impl Visitor for NeverStop {
    async fn visit(&self, _node: &FileNode) -> Result<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_never_stop_never_stops() {
        let node = FileNode::not_found();
        assert!(!NeverStop.visit(&node).await.unwrap());
    }
}
