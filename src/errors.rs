use thiserror::Error;

/// Errors surfaced by window lifecycle operations.
///
/// Only failures the caller can act on appear here. Persisted-state and
/// geometry-file failures are absorbed internally: they are logged and the
/// operation degrades to a documented default instead of failing.
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("could not determine the application data directory")]
    DataDirUnavailable,

    #[error("window construction failed: {message}")]
    Construction { message: String },
}

impl WindowError {
    /// Wrap a windowing-backend failure reported by the window factory.
    pub fn construction(message: impl Into<String>) -> Self {
        WindowError::Construction {
            message: message.into(),
        }
    }
}

/// Result type alias for window lifecycle operations
pub type WindowResult<T> = Result<T, WindowError>;
