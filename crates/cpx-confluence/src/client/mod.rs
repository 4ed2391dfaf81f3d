//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence Cloud / Data Center REST
//! API with basic authentication (account name + API token).

mod pages;

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cpx_config::ConfluenceSettings;
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::error::ConfluenceError;

pub use pages::PageStream;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Default number of items requested per search page.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Upper bound for a single response body. Page bodies are embedded in
/// search results, so this is well above ureq's default.
const MAX_RESPONSE_BYTES: u64 = 256 * 1024 * 1024;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
    page_limit: usize,
}

impl ConfluenceClient {
    /// Create client for a Confluence base URL.
    ///
    /// # Arguments
    /// * `base_url` - Confluence base URL (e.g. `https://acme.atlassian.net/wiki`)
    /// * `username` - Atlassian account name
    /// * `api_token` - Atlassian API token
    #[must_use]
    pub fn new(base_url: &str, username: &str, api_token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        let credentials = STANDARD.encode(format!("{username}:{api_token}"));

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: format!("Basic {credentials}"),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Create client from validated settings.
    #[must_use]
    pub fn from_settings(settings: &ConfluenceSettings) -> Self {
        Self::new(
            &settings.url,
            &settings.username,
            settings.api_token.expose(),
        )
    }

    /// Set the number of items requested per search page.
    #[must_use]
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit.max(1);
        self
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// GET a URL and decode the JSON response.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ConfluenceError> {
        debug!("GET {}", url);

        let response = self
            .agent
            .get(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status == 401 || status == 403 {
            return Err(ConfluenceError::Unauthorized { status });
        }
        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body = body_reader
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}
