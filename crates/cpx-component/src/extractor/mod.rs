//! Extraction run for the `confluence_pages` table.
//!
//! [`Extractor::run`] performs one end-to-end run:
//!
//! 1. Load `config.json` and require `username`, `url`, `#api_token`
//! 2. Resolve the start timestamp from `in/state.json` (incremental only)
//! 3. Open `out/tables/confluence_pages.csv` and write the header
//! 4. Stream every page from Confluence into the table
//! 5. Write the manifest and `out/state.json`
//!
//! State is written last, so a failed run never advances the checkpoint.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cpx_component::{DataDir, Extractor};
//!
//! let summary = Extractor::new(DataDir::new("/data")).run()?;
//! println!("fetched {} pages", summary.fetched);
//! # Ok(())
//! # }
//! ```

mod executor;
mod result;

pub use executor::{Extractor, RunPlan};
pub use result::RunSummary;

/// Name of the output table.
pub const TABLE_NAME: &str = "confluence_pages";
