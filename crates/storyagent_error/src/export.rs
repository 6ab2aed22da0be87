//! Errors writing a finished story to disk.

/// The final story state could not be written.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: cannot write {}: {} at line {} in {}", path, reason, line, file)]
pub struct ExportError {
    /// Destination path
    pub path: String,
    /// Underlying I/O failure
    pub reason: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ExportError {
    /// Create a new export error at the caller's location.
    #[track_caller]
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            path: path.into(),
            reason: reason.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
