//! Confluence integration for the pages extractor.
//!
//! - [`ConfluenceClient`]: sync REST client with basic authentication
//! - [`PageStream`]: lazy, cursor-paginated search over pages
//! - [`PageRecord`]: one output row per page
//! - [`html_to_text`]: storage-format markup to plain text
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chrono::{TimeZone, Utc};
//! use cpx_confluence::ConfluenceClient;
//!
//! let client = ConfluenceClient::new("https://acme.atlassian.net/wiki", "bot@acme.com", "token");
//! let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//!
//! for page in client.fetch_pages(since, true) {
//!     let page = page?;
//!     println!("{} {}", page.id, page.title);
//! }
//! # Ok(())
//! # }
//! ```

mod beautify;
mod client;
mod error;
mod record;
pub mod types;

pub use beautify::html_to_text;
pub use client::{ConfluenceClient, DEFAULT_PAGE_LIMIT, PageStream};
pub use error::ConfluenceError;
pub use record::PageRecord;
