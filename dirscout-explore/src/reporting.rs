//! Error reporters for absorbed traversal failures.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use dirscout_core::{DirscoutError, ErrorReporter};

/// The default reporter: logs each absorbed error at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    /// Create a new tracing reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &DirscoutError, origin: &str, path: &Path) {
        warn!(
            "Exploration degraded during {} at {}: {}",
            origin,
            path.display(),
            error
        );
    }
}

/// One degradation captured by a [`CollectingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedError {
    /// The operation that failed, such as `"list_directory"`.
    pub origin: String,
    /// The path the operation failed on.
    pub path: PathBuf,
    /// The rendered error message.
    pub message: String,
}

/// A reporter that accumulates every absorbed error in memory.
///
/// Tests assert on the captured reports; embedders can surface them to
/// users after a traversal finishes. Share it via `Arc` to read reports
/// after handing it to an explorer.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    reports: Mutex<Vec<ReportedError>>,
}

impl CollectingReporter {
    /// Create an empty collecting reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of everything reported so far.
    #[must_use]
    pub fn reports(&self) -> Vec<ReportedError> {
        self.lock().clone()
    }

    /// Number of reports captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportedError>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, error: &DirscoutError, origin: &str, path: &Path) {
        self.lock().push(ReportedError {
            origin: origin.to_string(),
            path: path.to_path_buf(),
            message: error.to_string(),
        });
    }
}
