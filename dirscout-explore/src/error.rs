//! Error types for the exploration engine.

use thiserror::Error;

/// Errors that can occur while driving a directory exploration.
#[derive(Error, Debug)]
pub enum ExploreError {
    /// IO error occurred while reading files or directories.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core framework error.
    #[error("Core error: {0}")]
    Core(#[from] dirscout_core::error::DirscoutError),

    /// Session registry error.
    #[error("Session error: {message}")]
    Session {
        /// Error message describing the session issue.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Generic error with custom message.
    #[error("Exploration error: {message}")]
    Generic {
        /// Generic error message.
        message: String,
    },
}

/// Result type alias for exploration operations.
pub type Result<T> = std::result::Result<T, ExploreError>;

impl ExploreError {
    /// Create a new session error.
    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new generic error.
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }
}

// Convert from anyhow::Error for convenience
impl From<anyhow::Error> for ExploreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Generic {
            message: err.to_string(),
        }
    }
}

// Convert to DirscoutError for trait compatibility
impl From<ExploreError> for dirscout_core::error::DirscoutError {
    fn from(err: ExploreError) -> Self {
        match err {
            ExploreError::Io(e) => Self::Io(e),
            ExploreError::Core(e) => e,
            ExploreError::Session { message } => Self::Session { message },
            ExploreError::Configuration { message } => Self::Configuration { message },
            ExploreError::Generic { message } => Self::Internal { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirscout_core::DirscoutError;

    #[test]
    fn test_core_errors_convert_both_ways() {
        let core = DirscoutError::provider("listing failed");
        let explore: ExploreError = core.into();
        assert!(matches!(explore, ExploreError::Core(_)));

        let back: DirscoutError = explore.into();
        assert!(back.is_provider_fault());
    }

    #[test]
    fn test_constructor_messages_surface_in_display() {
        let error = ExploreError::configuration("max_sessions must be at least 1");
        assert!(error.to_string().contains("max_sessions"));
    }
}
