//! Error reporting trait.

use std::path::Path;

use crate::DirscoutError;

/// A sink for errors the engine absorbs instead of failing on.
///
/// Traversal degrades on provider faults (an unreadable directory, a
/// vanished entry) and keeps going; each absorbed error is handed to the
/// reporter so it is observable without being fatal. Reporting is
/// synchronous and must not block: implementations log, count, or buffer.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Record one absorbed error.
    ///
    /// `origin` names the operation that failed (for example
    /// `"list_directory"`), `path` the filesystem path it failed on.
    fn report(&self, error: &DirscoutError, origin: &str, path: &Path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder {
        seen: Mutex<Vec<(String, String)>>,
    }

    impl ErrorReporter for Recorder {
        fn report(&self, _error: &DirscoutError, origin: &str, path: &Path) {
            self.seen
                .lock()
                .unwrap()
                .push((origin.to_string(), path.display().to_string()));
        }
    }

    #[test]
    fn test_reporter_receives_origin_and_path() {
        let recorder = Recorder::default();
        let error = DirscoutError::provider("boom");
        recorder.report(&error, "list_directory", Path::new("/locked"));

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![("list_directory".to_string(), "/locked".to_string())]
        );
    }
}
