//! Path filtering traits and combinators.
//!
//! Filters decide which nodes a traversal records and which directories it
//! descends into. The same trait serves both roles; the engine simply
//! applies one filter to candidate nodes and another to directories before
//! listing them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{FileNode, Result};

/// An async predicate over file nodes.
///
/// A filter answers `Ok(true)` to accept a node and `Ok(false)` to reject
/// it. Returning an error means the predicate itself is broken; the engine
/// propagates it to the caller instead of guessing a default.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use dirscout_core::traits::PathFilter;
/// use dirscout_core::{FileNode, Result};
///
/// #[derive(Debug)]
/// struct HiddenFiles;
///
/// #[async_trait]
/// impl PathFilter for HiddenFiles {
///     async fn matches(&self, node: &FileNode) -> Result<bool> {
///         Ok(node.name().is_some_and(|name| name.starts_with('.')))
///     }
/// }
/// ```
#[async_trait]
pub trait PathFilter: Send + Sync + std::fmt::Debug {
    /// Decide whether the node passes this filter.
    ///
    /// # Errors
    ///
    /// Returns an error when the predicate cannot be evaluated; the
    /// traversal aborts with it.
    async fn matches(&self, node: &FileNode) -> Result<bool>;

    /// Get a human-readable name for this filter.
    ///
    /// This is used for logging and debugging purposes.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Accepts every node. The default inclusion and descent filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

#[async_trait]
impl PathFilter for AcceptAll {
    async fn matches(&self, _node: &FileNode) -> Result<bool> {
        Ok(true)
    }
}

/// Rejects every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptNone;

#[async_trait]
impl PathFilter for AcceptNone {
    async fn matches(&self, _node: &FileNode) -> Result<bool> {
        Ok(false)
    }
}

/// Accepts a node only when every inner filter does.
///
/// Evaluation short-circuits on the first rejection, in the order the
/// filters were added. An empty list accepts everything.
#[derive(Debug, Default)]
pub struct AllOf {
    filters: Vec<Arc<dyn PathFilter>>,
}

impl AllOf {
    /// An empty conjunction, which accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter to the conjunction.
    #[must_use]
    pub fn with_filter(mut self, filter: Arc<dyn PathFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// The number of inner filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the conjunction has no inner filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[async_trait]
impl PathFilter for AllOf {
    async fn matches(&self, node: &FileNode) -> Result<bool> {
        for filter in &self.filters {
            if !filter.matches(node).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingFilter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PathFilter for CountingFilter {
        async fn matches(&self, _node: &FileNode) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_accept_all_and_none() {
        let node = FileNode::not_found();
        assert!(AcceptAll.matches(&node).await.unwrap());
        assert!(!AcceptNone.matches(&node).await.unwrap());
    }

    #[tokio::test]
    async fn test_all_of_requires_every_filter() {
        let node = FileNode::not_found();
        let both = AllOf::new()
            .with_filter(Arc::new(AcceptAll))
            .with_filter(Arc::new(AcceptAll));
        assert!(both.matches(&node).await.unwrap());

        let mixed = AllOf::new()
            .with_filter(Arc::new(AcceptAll))
            .with_filter(Arc::new(AcceptNone));
        assert!(!mixed.matches(&node).await.unwrap());
    }

    #[tokio::test]
    async fn test_all_of_short_circuits() {
        let counting = Arc::new(CountingFilter::default());
        let conjunction = AllOf::new()
            .with_filter(Arc::new(AcceptNone))
            .with_filter(counting.clone());

        let node = FileNode::not_found();
        assert!(!conjunction.matches(&node).await.unwrap());
        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_all_of_accepts() {
        let node = FileNode::not_found();
        assert!(AllOf::new().matches(&node).await.unwrap());
        assert!(AllOf::new().is_empty());
    }
}
