//! Error types for the dirscout engine.
//!
//! This module provides the shared error taxonomy used across the traversal
//! engine and its collaborators. The engine distinguishes provider faults
//! (absorbed and degraded at the smallest possible scope) from caller-logic
//! faults in filters and visitors (never absorbed).

use thiserror::Error;

/// Core error types for dirscout.
///
/// This enum covers all error conditions that can surface from the
/// filesystem provider, the traversal engine, and the caller-supplied
/// filter/visitor capabilities.
#[derive(Error, Debug)]
pub enum DirscoutError {
    /// I/O related errors (directory listing, stat calls, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filesystem provider failures that are not plain I/O errors.
    #[error("Provider error: {message}")]
    Provider {
        /// Detailed error message
        message: String,
    },

    /// A caller-supplied filter failed while evaluating a candidate.
    #[error("Filter error: {message}")]
    Filter {
        /// Detailed error message
        message: String,
    },

    /// A caller-supplied visitor failed while visiting a node.
    #[error("Visitor error: {message}")]
    Visitor {
        /// Detailed error message
        message: String,
    },

    /// Session registry failures (registry closed, slot unavailable).
    #[error("Session error: {message}")]
    Session {
        /// Detailed error message
        message: String,
    },

    /// Configuration validation errors.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Detailed error message
        message: String,
    },

    /// Internal engine errors.
    #[error("Internal error: {message}")]
    Internal {
        /// Detailed error message
        message: String,
    },

    /// Generic errors from external dependencies.
    #[error("External error: {source}")]
    External {
        /// The underlying error
        #[source]
        source: anyhow::Error,
    },
}

impl DirscoutError {
    /// Create a new provider error with a message.
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new filter error with a message.
    pub fn filter<S: Into<String>>(message: S) -> Self {
        Self::Filter {
            message: message.into(),
        }
    }

    /// Create a new visitor error with a message.
    pub fn visitor<S: Into<String>>(message: S) -> Self {
        Self::Visitor {
            message: message.into(),
        }
    }

    /// Create a new session error with a message.
    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create a new configuration error with a message.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new internal error with a message.
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a new external error from any error that implements `Into<anyhow::Error>`.
    pub fn external<E: Into<anyhow::Error>>(error: E) -> Self {
        Self::External {
            source: error.into(),
        }
    }

    /// Check if this error originated in the filesystem layer.
    ///
    /// Returns `true` for faults the traversal engine absorbs and degrades
    /// (a failed listing becomes an empty directory, a failed stat becomes
    /// default metadata). Caller-logic faults from filters and visitors
    /// return `false` and propagate out of the traversal unmasked.
    #[must_use]
    pub fn is_provider_fault(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Provider { .. })
    }

    /// Check if this error came from caller-supplied logic.
    ///
    /// Returns `true` for filter and visitor failures, which can never be
    /// safely defaulted without risking silently incorrect results.
    #[must_use]
    pub fn is_caller_fault(&self) -> bool {
        matches!(self, Self::Filter { .. } | Self::Visitor { .. })
    }
}

/// Convert from `anyhow::Error` to `DirscoutError`.
impl From<anyhow::Error> for DirscoutError {
    fn from(error: anyhow::Error) -> Self {
        Self::External { source: error }
    }
}

/// Result type alias for convenience.
///
/// This is the standard result type used throughout the dirscout crates.
pub type Result<T> = std::result::Result<T, DirscoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DirscoutError::provider("listing failed");
        assert!(matches!(err, DirscoutError::Provider { .. }));
        assert_eq!(err.to_string(), "Provider error: listing failed");
    }

    #[test]
    fn test_provider_fault_classification() {
        let io = DirscoutError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(io.is_provider_fault());
        assert!(DirscoutError::provider("gone").is_provider_fault());
        assert!(!DirscoutError::filter("broken predicate").is_provider_fault());
    }

    #[test]
    fn test_caller_fault_classification() {
        assert!(DirscoutError::filter("bad").is_caller_fault());
        assert!(DirscoutError::visitor("bad").is_caller_fault());
        assert!(!DirscoutError::session("full").is_caller_fault());
    }
}
