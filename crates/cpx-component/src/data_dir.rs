//! Data directory layout shared with the orchestrating platform.
//!
//! ```text
//! {root}/
//! +-- config.json
//! +-- in/
//! |   +-- state.json                 # state from the previous run
//! +-- out/
//!     +-- state.json                 # state for the next run
//!     +-- tables/
//!         +-- {table}.csv
//!         +-- {table}.csv.manifest
//! ```

use std::path::{Path, PathBuf};

/// State filename, both in `in/` and `out/`.
const STATE_FILENAME: &str = "state.json";

/// Root of a component data directory.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Wrap a data directory root. Nothing is created until written.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Data directory root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// State written by the previous run.
    #[must_use]
    pub fn in_state_path(&self) -> PathBuf {
        self.root.join("in").join(STATE_FILENAME)
    }

    /// State for the next run.
    #[must_use]
    pub fn out_state_path(&self) -> PathBuf {
        self.root.join("out").join(STATE_FILENAME)
    }

    /// Output tables directory.
    #[must_use]
    pub fn out_tables_dir(&self) -> PathBuf {
        self.root.join("out").join("tables")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let dir = DataDir::new("/data");
        assert_eq!(dir.root(), Path::new("/data"));
        assert_eq!(dir.in_state_path(), PathBuf::from("/data/in/state.json"));
        assert_eq!(dir.out_state_path(), PathBuf::from("/data/out/state.json"));
        assert_eq!(dir.out_tables_dir(), PathBuf::from("/data/out/tables"));
    }
}
