//! Content search response.

use serde::Deserialize;

use super::Content;

/// One page of `/rest/api/content/search` results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Content items on this page.
    #[serde(default)]
    pub results: Vec<Content>,
    /// Pagination links.
    #[serde(rename = "_links", default)]
    pub links: SearchLinks,
}

/// Pagination links of a search response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchLinks {
    /// Relative link to the next page (carries the cursor).
    #[serde(default)]
    pub next: Option<String>,
    /// Absolute base URL that relative links resolve against.
    #[serde(default)]
    pub base: Option<String>,
}
