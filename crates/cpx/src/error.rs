//! CLI error types.

use cpx_component::{ComponentError, EXIT_UNEXPECTED_ERROR};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Component(#[from] ComponentError),
}

impl CliError {
    /// Process exit code: 1 for user errors, 2 for anything else.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::Component(err) => err.exit_code(),
        }
    }

    /// Whether the message is meant for the user rather than a bug report.
    pub(crate) fn is_user_error(&self) -> bool {
        self.exit_code() != EXIT_UNEXPECTED_ERROR
    }
}

#[cfg(test)]
mod tests {
    use cpx_config::ConfigError;

    use super::*;

    #[test]
    fn test_config_error_exits_with_one() {
        let err = CliError::from(ComponentError::from(ConfigError::MissingFields(vec![
            "url",
        ])));
        assert_eq!(err.exit_code(), 1);
        assert!(err.is_user_error());
    }

    #[test]
    fn test_io_error_exits_with_two() {
        let err = CliError::from(ComponentError::from(std::io::Error::other("denied")));
        assert_eq!(err.exit_code(), 2);
        assert!(!err.is_user_error());
    }
}
