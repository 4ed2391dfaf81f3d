//! `${VAR}` references in `url`, `username` and `#api_token`.
//!
//! Lets a local `config.json` point at secrets kept in the environment.
//! `${VAR:-default}` falls back to `default` when `VAR` is unset; a plain
//! `${VAR}` that is unset fails config loading with the field name.

use crate::ConfigError;

/// Substitute `${VAR}` references in the value of `field`.
///
/// Only the braced form is recognized: API tokens may contain a literal `$`
/// and are returned untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Name of the unset variable, carried out of `shellexpand`.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_token_from_env() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("CPX_TEST_TOKEN", "s3cr3t");
        }
        let result = expand_env("${CPX_TEST_TOKEN}", "#api_token").unwrap();
        assert_eq!(result, "s3cr3t");
        unsafe {
            std::env::remove_var("CPX_TEST_TOKEN");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("CPX_TEST_UNSET_HOST");
        }
        let result = expand_env(
            "https://${CPX_TEST_UNSET_HOST:-acme.atlassian.net}/wiki",
            "url",
        )
        .unwrap();
        assert_eq!(result, "https://acme.atlassian.net/wiki");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("CPX_TEST_MISSING_USER");
        }
        let err = expand_env("${CPX_TEST_MISSING_USER}", "username").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CPX_TEST_MISSING_USER"));
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("pa$$word$TOKEN", "#api_token").unwrap();
        assert_eq!(result, "pa$$word$TOKEN");
    }
}
