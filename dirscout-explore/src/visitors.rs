//! Stock traversal visitors.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use dirscout_core::{FileNode, Result, Visitor};

/// Adapts a plain synchronous closure into a visitor.
pub struct VisitFn {
    callback: Box<dyn Fn(&FileNode) -> bool + Send + Sync>,
}

impl VisitFn {
    /// Wrap a closure. Returning `true` stops the traversal.
    #[must_use]
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&FileNode) -> bool + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl fmt::Debug for VisitFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl Visitor for VisitFn {
    async fn visit(&self, node: &FileNode) -> Result<bool> {
        Ok((self.callback)(node))
    }
}

/// Stops the traversal once a fixed number of nodes have been observed.
///
/// A limit of one stops at the first recorded node; a limit of zero
/// behaves the same way, since the decision is made on the first visit.
#[derive(Debug)]
pub struct StopAfter {
    limit: usize,
    seen: AtomicUsize,
}

impl StopAfter {
    /// Stop once `limit` nodes have been visited.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: AtomicUsize::new(0),
        }
    }

    /// How many nodes have been visited so far.
    #[must_use]
    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Visitor for StopAfter {
    async fn visit(&self, _node: &FileNode) -> Result<bool> {
        let observed = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(observed >= self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_stop_after_counts_to_its_limit() {
        let visitor = StopAfter::new(2);
        let node = FileNode::not_found();

        assert!(!visitor.visit(&node).await.unwrap());
        assert!(visitor.visit(&node).await.unwrap());
        assert_eq!(visitor.seen(), 2);
    }

    #[tokio::test]
    async fn test_stop_after_one_stops_immediately() {
        let visitor = StopAfter::new(1);
        let node = FileNode::not_found();
        assert!(visitor.visit(&node).await.unwrap());
    }

    #[tokio::test]
    async fn test_visit_fn_sees_the_node() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let visitor = VisitFn::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        });

        let node = FileNode::not_found();
        assert!(!visitor.visit(&node).await.unwrap());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
