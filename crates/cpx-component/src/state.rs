//! Run state persisted between executions.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ComponentError;

/// Start timestamp used when there is no usable previous run.
pub const DEFAULT_LAST_RUN: &str = "2000-01-01T00:00:00.000Z";

/// Persisted state: `{"last_run": "<ISO 8601>"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Start time of the last successful run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<String>,
}

impl State {
    /// State recording a run that started at `started_at`.
    #[must_use]
    pub fn for_run(started_at: DateTime<Utc>) -> Self {
        Self {
            last_run: Some(format_timestamp(started_at)),
        }
    }

    /// Read state from disk. A missing or blank file is an empty state.
    ///
    /// # Errors
    ///
    /// Returns an I/O error, or a JSON error if the file is not a state object.
    pub fn load(path: &Path) -> Result<Self, ComponentError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Write state to disk, creating the parent directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error.
    pub fn save(&self, path: &Path) -> Result<(), ComponentError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec(self)?)?;
        Ok(())
    }

    /// Stored `last_run`, ignoring empty values.
    #[must_use]
    pub fn last_run(&self) -> Option<&str> {
        self.last_run.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// Effective start timestamp of a run.
///
/// The stored value only counts when `incremental` is on; otherwise, or when
/// there is none, the fixed [`DEFAULT_LAST_RUN`] is used.
#[must_use]
pub fn effective_last_run(incremental: bool, state: &State) -> &str {
    if !incremental {
        return DEFAULT_LAST_RUN;
    }
    if let Some(last_run) = state.last_run() {
        info!("Using last_run from state file: {}", last_run);
        last_run
    } else {
        info!(
            "No last_run found in state file, using default timestamp: {}",
            DEFAULT_LAST_RUN
        );
        DEFAULT_LAST_RUN
    }
}

/// Format a timestamp as millisecond-precision ISO 8601 with a `Z` suffix.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp.
///
/// # Errors
///
/// Returns [`ComponentError::InvalidState`] if the value is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ComponentError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|source| ComponentError::InvalidState {
            value: value.to_owned(),
            source,
        })
}
