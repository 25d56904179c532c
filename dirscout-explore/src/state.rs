//! Per-traversal bookkeeping.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dirscout_core::{FileNode, PathFilter, Visitor};

/// The order a traversal walks a tree in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalStrategy {
    /// Visit a whole level before any of the next, driven by a FIFO queue.
    BreadthFirst,
    /// Visit each subtree completely before later siblings (pre-order).
    #[default]
    DepthFirst,
}

/// Counters describing what one traversal did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExploreStats {
    /// Directories successfully listed.
    pub directories_listed: usize,
    /// Listing entries examined.
    pub entries_examined: usize,
    /// Nodes recorded as matches.
    pub matches_recorded: usize,
    /// Errors absorbed and reported instead of failing the traversal.
    pub errors_degraded: usize,
}

/// State owned by a single traversal invocation.
///
/// Holds the work queue, the explored set, the accumulated results, and
/// the resolved visitor and filters. The state is created by the explorer
/// for one `collect` or `find_first` call and never shared, so none of it
/// needs locking. The explored set guarantees a directory is listed at
/// most once per traversal, no matter how often it is queued.
#[derive(Debug)]
pub struct ExplorationState {
    id: Uuid,
    strategy: TraversalStrategy,
    queue: VecDeque<PathBuf>,
    explored: HashSet<PathBuf>,
    results: Vec<FileNode>,
    pub(crate) visitor: Arc<dyn Visitor>,
    pub(crate) inclusion_filter: Arc<dyn PathFilter>,
    pub(crate) descent_filter: Arc<dyn PathFilter>,
    stats: ExploreStats,
}

impl ExplorationState {
    pub(crate) fn new(
        strategy: TraversalStrategy,
        visitor: Arc<dyn Visitor>,
        inclusion_filter: Arc<dyn PathFilter>,
        descent_filter: Arc<dyn PathFilter>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            strategy,
            queue: VecDeque::new(),
            explored: HashSet::new(),
            results: Vec::new(),
            visitor,
            inclusion_filter,
            descent_filter,
            stats: ExploreStats::default(),
        }
    }

    /// Unique id of this traversal, used for session tracking and logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The strategy this traversal runs under.
    #[must_use]
    pub fn strategy(&self) -> TraversalStrategy {
        self.strategy
    }

    /// Counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> ExploreStats {
        self.stats
    }

    /// The nodes recorded so far, in traversal order.
    #[must_use]
    pub fn results(&self) -> &[FileNode] {
        &self.results
    }

    pub(crate) fn into_results(self) -> Vec<FileNode> {
        self.results
    }

    pub(crate) fn enqueue(&mut self, path: PathBuf) {
        self.queue.push_back(path);
    }

    pub(crate) fn next_directory(&mut self) -> Option<PathBuf> {
        self.queue.pop_front()
    }

    pub(crate) fn is_explored(&self, path: &Path) -> bool {
        self.explored.contains(path)
    }

    pub(crate) fn mark_explored(&mut self, path: PathBuf) -> bool {
        self.explored.insert(path)
    }

    pub(crate) fn record(&mut self, node: FileNode) {
        self.stats.matches_recorded += 1;
        self.results.push(node);
    }

    pub(crate) fn note_listing(&mut self) {
        self.stats.directories_listed += 1;
    }

    pub(crate) fn note_entry(&mut self) {
        self.stats.entries_examined += 1;
    }

    pub(crate) fn note_degraded(&mut self) {
        self.stats.errors_degraded += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirscout_core::{AcceptAll, NeverStop};

    fn fresh_state() -> ExplorationState {
        ExplorationState::new(
            TraversalStrategy::BreadthFirst,
            Arc::new(NeverStop),
            Arc::new(AcceptAll),
            Arc::new(AcceptAll),
        )
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut state = fresh_state();
        state.enqueue(PathBuf::from("/a"));
        state.enqueue(PathBuf::from("/b"));

        assert_eq!(state.next_directory(), Some(PathBuf::from("/a")));
        assert_eq!(state.next_directory(), Some(PathBuf::from("/b")));
        assert_eq!(state.next_directory(), None);
    }

    #[test]
    fn test_explored_set_deduplicates() {
        let mut state = fresh_state();
        assert!(state.mark_explored(PathBuf::from("/a")));
        assert!(!state.mark_explored(PathBuf::from("/a")));
        assert!(state.is_explored(Path::new("/a")));
        assert!(!state.is_explored(Path::new("/b")));
    }

    #[test]
    fn test_recording_counts_matches() {
        let mut state = fresh_state();
        state.record(FileNode::not_found());
        state.note_entry();
        state.note_degraded();

        assert_eq!(state.stats().matches_recorded, 1);
        assert_eq!(state.stats().entries_examined, 1);
        assert_eq!(state.stats().errors_degraded, 1);
        assert_eq!(state.results().len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(fresh_state().id(), fresh_state().id());
    }
}
