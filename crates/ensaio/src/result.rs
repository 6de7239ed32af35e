//! Result and error types for ensaio.

use thiserror::Error;

/// Result type for ensaio operations
pub type EnsaioResult<T> = Result<T, EnsaioError>;

/// Errors that can occur while driving a session
#[derive(Debug, Error)]
pub enum EnsaioError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A wait-guarded operation's condition was never satisfied
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// No element matched the locator before the wait expired
    #[error("No element matched {locator} within {ms}ms")]
    ElementNotFound {
        /// Locator that never resolved
        locator: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// An element matched but never became clickable before the wait expired
    #[error("Element {locator} never became interactable within {ms}ms")]
    ElementNotInteractable {
        /// Locator that never became ready
        locator: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Driver-level fault (CDP command failed, evaluation error, ...)
    #[error("Driver fault: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Screenshot capture error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EnsaioError {
    /// Create a driver fault error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Whether this error is a wait expiry rather than an unexpected fault.
    ///
    /// The scenario runner uses this split to classify its terminal outcome:
    /// timeouts become `Outcome::TimedOut`, everything else becomes
    /// `Outcome::UnexpectedFailure`.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::ElementNotFound { .. }
                | Self::ElementNotInteractable { .. }
        )
    }
}
