//! Stock path filters.
//!
//! Ready-made `PathFilter` implementations covering the common cases:
//! matching on base names or extensions, rejecting well-known directory
//! names, and adapting plain closures.

use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;

use dirscout_core::{FileNode, PathFilter, Result};

/// Accepts nodes whose base name equals one of the configured names.
#[derive(Debug, Clone)]
pub struct NameFilter {
    names: HashSet<String>,
}

impl NameFilter {
    /// Match a single exact base name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::any_of([name.into()])
    }

    /// Match any of the given base names.
    #[must_use]
    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl PathFilter for NameFilter {
    async fn matches(&self, node: &FileNode) -> Result<bool> {
        Ok(node.name().is_some_and(|name| self.names.contains(&name)))
    }
}

/// Accepts nodes whose extension is in the configured set.
///
/// Matching is case-insensitive, and a leading dot on configured
/// extensions is ignored, so `"rs"` and `".RS"` configure the same thing.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: HashSet<String>,
}

impl ExtensionFilter {
    /// Match any of the given extensions.
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }
}

#[async_trait]
impl PathFilter for ExtensionFilter {
    async fn matches(&self, node: &FileNode) -> Result<bool> {
        Ok(node
            .extension()
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase())))
    }
}

/// Rejects nodes whose base name is in the configured set and accepts
/// everything else.
///
/// The usual descent filter for keeping traversal out of directories like
/// `node_modules` or `.git`.
#[derive(Debug, Clone)]
pub struct ExcludeNames {
    names: HashSet<String>,
}

impl ExcludeNames {
    /// Reject any of the given base names.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl PathFilter for ExcludeNames {
    async fn matches(&self, node: &FileNode) -> Result<bool> {
        Ok(!node.name().is_some_and(|name| self.names.contains(&name)))
    }
}

/// Adapts a plain synchronous closure into a filter.
pub struct FilterFn {
    predicate: Box<dyn Fn(&FileNode) -> bool + Send + Sync>,
}

impl FilterFn {
    /// Wrap a closure. `true` accepts the node.
    #[must_use]
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&FileNode) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl fmt::Debug for FilterFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl PathFilter for FilterFn {
    async fn matches(&self, node: &FileNode) -> Result<bool> {
        Ok((self.predicate)(node))
    }
}
