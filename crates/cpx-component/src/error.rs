//! Error types for an extraction run.

use cpx_config::ConfigError;
use cpx_confluence::ConfluenceError;

/// Process exit code for errors the user can fix (configuration, credentials,
/// upstream API failures).
pub const EXIT_USER_ERROR: i32 = 1;

/// Process exit code for any other failure.
pub const EXIT_UNEXPECTED_ERROR: i32 = 2;

/// Error during an extraction run.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// Configuration missing, unreadable or incomplete.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Confluence API error.
    #[error("Cannot fetch data from Confluence, error: {0}")]
    Client(#[from] ConfluenceError),

    /// Stored `last_run` is not a timestamp.
    #[error("Invalid last_run in state file: {value:?}")]
    InvalidState {
        /// Stored value.
        value: String,
        /// Parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// IO error (data directory, state file, output table).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// State or manifest (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ComponentError {
    /// Whether the error is caused by input the user controls.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Client(_) | Self::InvalidState { .. }
        )
    }

    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.is_user_error() {
            EXIT_USER_ERROR
        } else {
            EXIT_UNEXPECTED_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config = ComponentError::Config(ConfigError::MissingFields(vec!["url"]));
        assert_eq!(config.exit_code(), EXIT_USER_ERROR);

        let client = ComponentError::Client(ConfluenceError::Unauthorized { status: 401 });
        assert_eq!(client.exit_code(), EXIT_USER_ERROR);
        assert_eq!(
            client.to_string(),
            "Cannot fetch data from Confluence, error: authentication rejected (HTTP 401), check username and API token"
        );

        let io = ComponentError::Io(std::io::Error::other("disk full"));
        assert_eq!(io.exit_code(), EXIT_UNEXPECTED_ERROR);
    }
}
