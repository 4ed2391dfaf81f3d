//! Extraction driver for the Confluence pages extractor.
//!
//! - [`DataDir`]: config, state and output table locations
//! - [`State`]: `last_run` checkpoint between runs
//! - [`TableWriter`]: streaming CSV table with manifest
//! - [`Extractor`]: one end-to-end extraction run

mod data_dir;
pub mod error;
pub mod extractor;
pub mod state;
mod table;

pub use data_dir::DataDir;
pub use error::{ComponentError, EXIT_UNEXPECTED_ERROR, EXIT_USER_ERROR};
pub use extractor::{Extractor, RunPlan, RunSummary, TABLE_NAME};
pub use state::{DEFAULT_LAST_RUN, State};
pub use table::{TableDefinition, TableWriter};
