//! Confluence API types.

mod content;
mod search;

pub use content::{Body, Content, History, LastUpdated, Links, Space, Storage, User};
pub use search::{SearchLinks, SearchResponse};
