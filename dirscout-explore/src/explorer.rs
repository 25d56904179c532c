//! The directory traversal engine.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use dirscout_core::{
    path as core_path, AcceptAll, DirectoryEntry, ErrorReporter, FileNode, FilesystemProvider,
    NeverStop, PathFilter, Result as CoreResult, Visitor,
};

use crate::error::{ExploreError, Result};
use crate::reporting::TracingReporter;
use crate::session::{SessionRegistry, DEFAULT_SESSION_CAPACITY};
use crate::state::{ExplorationState, TraversalStrategy};
use crate::visitors::StopAfter;

/// Configuration for a [`DirectoryExplorer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Maximum number of concurrently active traversals. Must be at
    /// least 1.
    pub max_sessions: usize,
    /// Strategy used when a run does not specify one.
    pub strategy: TraversalStrategy,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_SESSION_CAPACITY,
            strategy: TraversalStrategy::default(),
        }
    }
}

impl ExplorerConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of concurrent traversals.
    #[must_use]
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Set the default traversal strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: TraversalStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `max_sessions` is zero, which
    /// would admit no traversal at all.
    pub fn validate(&self) -> Result<()> {
        if self.max_sessions == 0 {
            return Err(ExploreError::configuration(
                "max_sessions must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Per-run options for [`DirectoryExplorer::collect`].
///
/// Every field is optional; unset fields fall back to the explorer's
/// defaults (accept everything, never stop, configured strategy).
#[derive(Debug, Clone, Default)]
pub struct ExploreOptions {
    /// Visitor invoked for each recorded node.
    pub visitor: Option<Arc<dyn Visitor>>,
    /// Inclusion filter deciding which nodes are recorded.
    pub file_filter: Option<Arc<dyn PathFilter>>,
    /// Descent filter deciding which directories are listed.
    pub directory_filter: Option<Arc<dyn PathFilter>>,
    /// Traversal strategy for this run.
    pub strategy: Option<TraversalStrategy>,
}

impl ExploreOptions {
    /// Create options that use the explorer's defaults everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visitor for this run.
    #[must_use]
    pub fn with_visitor(mut self, visitor: Arc<dyn Visitor>) -> Self {
        self.visitor = Some(visitor);
        self
    }

    /// Set the inclusion filter for this run.
    #[must_use]
    pub fn with_file_filter(mut self, filter: Arc<dyn PathFilter>) -> Self {
        self.file_filter = Some(filter);
        self
    }

    /// Set the descent filter for this run.
    #[must_use]
    pub fn with_directory_filter(mut self, filter: Arc<dyn PathFilter>) -> Self {
        self.directory_filter = Some(filter);
        self
    }

    /// Set the traversal strategy for this run.
    #[must_use]
    pub fn with_strategy(mut self, strategy: TraversalStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

/// Options for [`DirectoryExplorer::find_first`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    /// Descend into subdirectories. Off by default: only the start
    /// directory itself and the files it directly contains are
    /// considered.
    pub recursive: bool,
    /// Traversal strategy for this lookup.
    pub strategy: Option<TraversalStrategy>,
}

impl FindOptions {
    /// Create options for a non-recursive lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the lookup descends into subdirectories.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the traversal strategy for this lookup.
    #[must_use]
    pub fn with_strategy(mut self, strategy: TraversalStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

/// Outcome of processing one directory or entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Keep traversing.
    Continue,
    /// The visitor asked to stop; unwind with the results so far.
    Stop,
}

/// Restricts descent to a single directory, for non-recursive lookups.
#[derive(Debug)]
struct RootOnly {
    root: PathBuf,
}

#[async_trait]
impl PathFilter for RootOnly {
    async fn matches(&self, node: &FileNode) -> CoreResult<bool> {
        Ok(node.path() == self.root)
    }
}

/// Walks directory trees and reports the nodes that pass its filters.
///
/// The explorer owns no per-traversal state; each [`collect`] or
/// [`find_first`] call builds its own [`ExplorationState`], registers a
/// session with the bounded registry, and walks sequentially, suspending
/// at every provider call. Provider faults degrade (reported, traversal
/// continues); filter and visitor errors propagate to the caller.
///
/// [`collect`]: DirectoryExplorer::collect
/// [`find_first`]: DirectoryExplorer::find_first
///
/// # Examples
///
/// ```rust,no_run
/// use dirscout_explore::prelude::*;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let explorer = DirectoryExplorer::new(Arc::new(TokioFilesystem::new()));
///     let options = ExploreOptions::new()
///         .with_file_filter(Arc::new(ExtensionFilter::new(["log"])))
///         .with_directory_filter(Arc::new(ExcludeNames::new([".git"])));
///
///     let nodes = explorer.collect("/var/log", options).await?;
///     println!("Found {} log files", nodes.len());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct DirectoryExplorer {
    provider: Arc<dyn FilesystemProvider>,
    reporter: Arc<dyn ErrorReporter>,
    sessions: Arc<SessionRegistry>,
    config: ExplorerConfig,
    default_visitor: Arc<dyn Visitor>,
    default_file_filter: Arc<dyn PathFilter>,
    default_directory_filter: Arc<dyn PathFilter>,
}

impl DirectoryExplorer {
    /// Create an explorer over the given provider with default
    /// configuration.
    #[must_use]
    pub fn new(provider: Arc<dyn FilesystemProvider>) -> Self {
        let config = ExplorerConfig::default();
        Self {
            provider,
            reporter: Arc::new(TracingReporter::new()),
            sessions: Arc::new(SessionRegistry::new(config.max_sessions)),
            config,
            default_visitor: Arc::new(NeverStop),
            default_file_filter: Arc::new(AcceptAll),
            default_directory_filter: Arc::new(AcceptAll),
        }
    }

    /// Create an explorer with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the configuration is invalid.
    pub fn with_config(
        provider: Arc<dyn FilesystemProvider>,
        config: ExplorerConfig,
    ) -> Result<Self> {
        config.validate()?;
        let mut explorer = Self::new(provider);
        explorer.sessions = Arc::new(SessionRegistry::new(config.max_sessions));
        explorer.config = config;
        Ok(explorer)
    }

    /// Start building an explorer with full control over its parts.
    #[must_use]
    pub fn builder() -> DirectoryExplorerBuilder {
        DirectoryExplorerBuilder::default()
    }

    /// The explorer's configuration.
    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// The session registry bounding concurrent traversals.
    #[must_use]
    pub fn sessions(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.sessions)
    }

    /// Walk the tree under `start` and return every node that passes the
    /// inclusion filter, in traversal order.
    ///
    /// Breadth-first runs return level order; depth-first runs return
    /// pre-order. Sibling order is the provider's listing order. A blank
    /// start path means there is nothing to search and yields an empty
    /// result. The call waits for a session slot when the registry is
    /// full.
    ///
    /// # Errors
    ///
    /// Returns an error when a filter or visitor fails, or when a
    /// provider reports a fault the engine does not degrade.
    pub async fn collect(
        &self,
        start: impl AsRef<Path>,
        options: ExploreOptions,
    ) -> Result<Vec<FileNode>> {
        let start = start.as_ref();
        if start.as_os_str().is_empty() {
            debug!("Blank start path, nothing to explore");
            return Ok(Vec::new());
        }

        let root = core_path::resolve([start]);
        let strategy = options.strategy.unwrap_or(self.config.strategy);
        let mut state = ExplorationState::new(
            strategy,
            options
                .visitor
                .unwrap_or_else(|| Arc::clone(&self.default_visitor)),
            options
                .file_filter
                .unwrap_or_else(|| Arc::clone(&self.default_file_filter)),
            options
                .directory_filter
                .unwrap_or_else(|| Arc::clone(&self.default_directory_filter)),
        );

        let _session = self.sessions.register(state.id(), root.clone()).await?;
        info!(
            "Exploring {} ({:?}, session {})",
            root.display(),
            strategy,
            state.id()
        );

        state.enqueue(root);
        while let Some(dir) = state.next_directory() {
            if self.visit_directory(&dir, &mut state).await? == Flow::Stop {
                debug!("Session {} stopped early by visitor", state.id());
                break;
            }
        }

        let stats = state.stats();
        info!(
            "Explored {} directories, examined {} entries, recorded {} matches (session {})",
            stats.directories_listed,
            stats.entries_examined,
            stats.matches_recorded,
            state.id()
        );
        Ok(state.into_results())
    }

    /// Return the first node under `start` that passes `filter`, in
    /// traversal order, without exhausting the rest of the tree.
    ///
    /// Non-recursive by default: only the start directory itself and the
    /// files it directly contains are considered. A blank start path
    /// yields `None`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`collect`](DirectoryExplorer::collect).
    pub async fn find_first(
        &self,
        start: impl AsRef<Path>,
        filter: Arc<dyn PathFilter>,
        options: FindOptions,
    ) -> Result<Option<FileNode>> {
        let start = start.as_ref();
        if start.as_os_str().is_empty() {
            return Ok(None);
        }
        let root = core_path::resolve([start]);

        let mut explore = ExploreOptions::new()
            .with_file_filter(filter)
            .with_visitor(Arc::new(StopAfter::new(1)));
        if !options.recursive {
            explore = explore.with_directory_filter(Arc::new(RootOnly { root: root.clone() }));
        }
        if let Some(strategy) = options.strategy {
            explore = explore.with_strategy(strategy);
        }

        let results = self.collect(root, explore).await?;
        Ok(results.into_iter().next())
    }

    /// Process one directory: apply the descent filter, record the
    /// directory itself if it passes the inclusion filter, then walk its
    /// listing. Subdirectories are enqueued (breadth-first) or recursed
    /// into immediately (depth-first).
    fn visit_directory<'a>(
        &'a self,
        dir: &'a Path,
        state: &'a mut ExplorationState,
    ) -> Pin<Box<dyn Future<Output = Result<Flow>> + Send + 'a>> {
        Box::pin(async move {
            // A directory can reach the queue through more than one path;
            // list it at most once per traversal.
            if state.is_explored(dir) {
                debug!("Already explored {}, skipping", dir.display());
                return Ok(Flow::Continue);
            }

            let node = FileNode::directory(Arc::clone(&self.provider), dir);
            if !state.descent_filter.matches(&node).await? {
                debug!("Descent filter rejected {}", dir.display());
                return Ok(Flow::Continue);
            }

            if self.record_if_match(&node, state).await? == Flow::Stop {
                return Ok(Flow::Stop);
            }

            let entries = self.list_or_degrade(dir, state).await?;
            state.mark_explored(dir.to_path_buf());

            for entry in entries {
                state.note_entry();
                if entry.is_traversable() {
                    let child = entry.full_path();
                    match state.strategy() {
                        TraversalStrategy::BreadthFirst => state.enqueue(child),
                        TraversalStrategy::DepthFirst => {
                            if self.visit_directory(&child, state).await? == Flow::Stop {
                                return Ok(Flow::Stop);
                            }
                        }
                    }
                } else {
                    let node = FileNode::from_entry(Arc::clone(&self.provider), &entry);
                    if self.record_if_match(&node, state).await? == Flow::Stop {
                        return Ok(Flow::Stop);
                    }
                }
            }

            Ok(Flow::Continue)
        })
    }

    /// List a directory, degrading provider faults to an empty listing.
    /// The fault is handed to the error reporter; anything else
    /// (a broken custom provider) propagates.
    async fn list_or_degrade(
        &self,
        dir: &Path,
        state: &mut ExplorationState,
    ) -> Result<Vec<DirectoryEntry>> {
        match self.provider.list_directory(dir).await {
            Ok(entries) => {
                state.note_listing();
                debug!("Listed {} entries in {}", entries.len(), dir.display());
                Ok(entries)
            }
            Err(error) if error.is_provider_fault() => {
                self.reporter.report(&error, "list_directory", dir);
                state.note_degraded();
                Ok(Vec::new())
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Record the node if the inclusion filter accepts it, then let the
    /// visitor decide whether to stop.
    async fn record_if_match(&self, node: &FileNode, state: &mut ExplorationState) -> Result<Flow> {
        if !state.inclusion_filter.matches(node).await? {
            debug!("Filtered out {}", node.path().display());
            return Ok(Flow::Continue);
        }

        state.record(node.clone());
        if state.visitor.visit(node).await? {
            debug!("Visitor stopped traversal at {}", node.path().display());
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }
}

/// Builder for [`DirectoryExplorer`].
#[derive(Debug, Default)]
pub struct DirectoryExplorerBuilder {
    provider: Option<Arc<dyn FilesystemProvider>>,
    reporter: Option<Arc<dyn ErrorReporter>>,
    sessions: Option<Arc<SessionRegistry>>,
    config: ExplorerConfig,
    default_visitor: Option<Arc<dyn Visitor>>,
    default_file_filter: Option<Arc<dyn PathFilter>>,
    default_directory_filter: Option<Arc<dyn PathFilter>>,
}

impl DirectoryExplorerBuilder {
    /// Set the filesystem provider (required).
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn FilesystemProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the reporter for absorbed errors. Defaults to
    /// [`TracingReporter`].
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Share an existing session registry instead of creating one, to
    /// bound several explorers jointly.
    #[must_use]
    pub fn with_sessions(mut self, sessions: Arc<SessionRegistry>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: ExplorerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum number of concurrent traversals.
    #[must_use]
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.config.max_sessions = max_sessions;
        self
    }

    /// Set the default traversal strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: TraversalStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set the visitor used when a run does not supply one.
    #[must_use]
    pub fn with_default_visitor(mut self, visitor: Arc<dyn Visitor>) -> Self {
        self.default_visitor = Some(visitor);
        self
    }

    /// Set the inclusion filter used when a run does not supply one.
    #[must_use]
    pub fn with_default_file_filter(mut self, filter: Arc<dyn PathFilter>) -> Self {
        self.default_file_filter = Some(filter);
        self
    }

    /// Set the descent filter used when a run does not supply one.
    #[must_use]
    pub fn with_default_directory_filter(mut self, filter: Arc<dyn PathFilter>) -> Self {
        self.default_directory_filter = Some(filter);
        self
    }

    /// Build the explorer.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no provider was set or the
    /// configuration is invalid.
    pub fn build(self) -> Result<DirectoryExplorer> {
        let provider = self.provider.ok_or_else(|| {
            ExploreError::configuration("a filesystem provider is required")
        })?;
        self.config.validate()?;

        let sessions = self
            .sessions
            .unwrap_or_else(|| Arc::new(SessionRegistry::new(self.config.max_sessions)));

        Ok(DirectoryExplorer {
            provider,
            reporter: self
                .reporter
                .unwrap_or_else(|| Arc::new(TracingReporter::new())),
            sessions,
            config: self.config,
            default_visitor: self.default_visitor.unwrap_or_else(|| Arc::new(NeverStop)),
            default_file_filter: self
                .default_file_filter
                .unwrap_or_else(|| Arc::new(AcceptAll)),
            default_directory_filter: self
                .default_directory_filter
                .unwrap_or_else(|| Arc::new(AcceptAll)),
        })
    }
}
