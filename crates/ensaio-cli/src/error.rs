//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// No scenario registered under the given name
    #[error("Unknown scenario '{name}'. Try `ensaiar list`.")]
    UnknownScenario {
        /// The requested name
        name: String,
    },

    /// Library error
    #[error(transparent)]
    Ensaio(#[from] ensaio::EnsaioError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_scenario_display() {
        let err = CliError::UnknownScenario {
            name: "register-vehicle".into(),
        };
        assert!(err.to_string().contains("register-vehicle"));
        assert!(err.to_string().contains("ensaiar list"));
    }

    #[test]
    fn test_library_error_passthrough() {
        let err: CliError = ensaio::EnsaioError::Timeout { ms: 10_000 }.into();
        assert_eq!(err.to_string(), "Operation timed out after 10000ms");
    }
}
