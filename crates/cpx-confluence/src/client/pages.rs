//! Page search with cursor pagination.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::record::PageRecord;
use crate::types::SearchResponse;

/// Fields expanded on every search result.
const EXPAND: &str = "space,history,history.lastUpdated,body.storage";

impl ConfluenceClient {
    /// Lazily fetch all pages modified at or after `timestamp_from`.
    ///
    /// No request is made until the returned stream is polled.
    #[must_use]
    pub fn fetch_pages(&self, timestamp_from: DateTime<Utc>, beautify: bool) -> PageStream<'_> {
        let cql = modified_since_cql(timestamp_from);
        let url = format!(
            "{}/content/search?cql={}&expand={}&limit={}",
            self.api_url(),
            utf8_percent_encode(&cql, NON_ALPHANUMERIC),
            utf8_percent_encode(EXPAND, NON_ALPHANUMERIC),
            self.page_limit
        );

        info!("Searching Confluence pages with CQL: {}", cql);

        PageStream {
            client: self,
            next_url: Some(url),
            beautify,
            buffer: VecDeque::new(),
            fetched: 0,
        }
    }
}

/// Hours subtracted from the start instant before it goes into CQL.
///
/// Confluence reads absolute CQL dates in the profile timezone of the
/// querying user, which may be up to a day away from UTC.
const TIMEZONE_OVERLAP_HOURS: i64 = 24;

/// CQL selecting pages modified at or after the given instant.
///
/// The bound is moved back by [`TIMEZONE_OVERLAP_HOURS`] and floored to the
/// minute, so the window always covers `timestamp_from` whatever the user's
/// profile timezone is. Pages in the overlap are fetched again; loads upsert
/// on `id`.
fn modified_since_cql(timestamp_from: DateTime<Utc>) -> String {
    let bound = timestamp_from
        .checked_sub_signed(TimeDelta::hours(TIMEZONE_OVERLAP_HOURS))
        .unwrap_or(timestamp_from);
    format!(
        r#"type = page AND lastmodified >= "{}" ORDER BY lastmodified ASC"#,
        bound.format("%Y-%m-%d %H:%M")
    )
}

/// Pull-based sequence of page records.
///
/// [`PageStream::next_batch`] returns one server page at a time;
/// the [`Iterator`] impl flattens batches into single records and stops
/// after the first error.
pub struct PageStream<'a> {
    client: &'a ConfluenceClient,
    next_url: Option<String>,
    beautify: bool,
    buffer: VecDeque<PageRecord>,
    fetched: usize,
}

impl PageStream<'_> {
    /// Fetch the next server page.
    ///
    /// Returns `Ok(None)` once the server has no more results. The cursor
    /// only advances after a page was received and parsed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError`] on transport, status or payload failures.
    pub fn next_batch(&mut self) -> Result<Option<Vec<PageRecord>>, ConfluenceError> {
        let Some(url) = self.next_url.as_deref() else {
            return Ok(None);
        };

        let response: SearchResponse = self.client.get_json(url)?;

        if response.results.is_empty() {
            self.next_url = None;
            return Ok(None);
        }

        let base = response
            .links
            .base
            .as_deref()
            .map_or(self.client.base_url(), |b| b.trim_end_matches('/'))
            .to_owned();

        self.next_url = response
            .links
            .next
            .as_deref()
            .map(|next| resolve_link(&base, next));

        let records: Vec<PageRecord> = response
            .results
            .into_iter()
            .map(|content| PageRecord::from_content(content, &base, self.beautify))
            .collect();

        self.fetched += records.len();
        info!(
            "Fetched {} pages ({} so far)",
            records.len(),
            self.fetched
        );

        Ok(Some(records))
    }

    /// Number of records received from the server so far.
    #[must_use]
    pub fn fetched(&self) -> usize {
        self.fetched
    }
}

impl Iterator for PageStream<'_> {
    type Item = Result<PageRecord, ConfluenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Some(Ok(record));
            }
            match self.next_batch() {
                Ok(Some(batch)) => self.buffer.extend(batch),
                Ok(None) => return None,
                Err(err) => {
                    self.next_url = None;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Resolve a `_links.next` value against the response base URL.
fn resolve_link(base: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_owned()
    } else {
        format!("{base}{link}")
    }
}
