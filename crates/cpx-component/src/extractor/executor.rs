//! Extraction run implementation.

use chrono::{DateTime, Utc};
use cpx_config::{Config, ConfluenceSettings};
use cpx_confluence::{ConfluenceClient, PageRecord};
use tracing::info;

use super::TABLE_NAME;
use super::result::RunSummary;
use crate::data_dir::DataDir;
use crate::error::ComponentError;
use crate::state::{self, State};
use crate::table::{TableDefinition, TableWriter};

/// Runs one extraction against a data directory.
pub struct Extractor {
    data_dir: DataDir,
    started_at: DateTime<Utc>,
    page_limit: Option<usize>,
}

/// Everything resolved before the first request.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Validated connection settings.
    pub settings: ConfluenceSettings,
    /// Start timestamp as stored or defaulted.
    pub started_from: String,
    /// Parsed start timestamp.
    pub since: DateTime<Utc>,
}

impl Extractor {
    /// Create an extractor whose run starts now.
    #[must_use]
    pub fn new(data_dir: DataDir) -> Self {
        Self {
            data_dir,
            started_at: Utc::now(),
            page_limit: None,
        }
    }

    /// Override the run start time persisted as the next `last_run`.
    #[must_use]
    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Override the number of pages requested per API call.
    #[must_use]
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// Load configuration and state and resolve the start timestamp.
    ///
    /// Makes no network calls.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Config`] if required parameters are missing,
    /// or [`ComponentError::InvalidState`] if the stored `last_run` is not a
    /// timestamp.
    pub fn plan(&self) -> Result<RunPlan, ComponentError> {
        let config = Config::load_from_data_dir(self.data_dir.root())?;
        let settings = config.require_confluence()?;

        let stored = if settings.destination.incremental {
            State::load(&self.data_dir.in_state_path())?
        } else {
            State::default()
        };
        let started_from =
            state::effective_last_run(settings.destination.incremental, &stored).to_owned();
        let since = state::parse_timestamp(&started_from)?;

        Ok(RunPlan {
            settings,
            started_from,
            since,
        })
    }

    /// Execute one extraction run.
    ///
    /// Rows written before a failure stay in the output file; state is only
    /// written after every page has been stored.
    ///
    /// # Errors
    ///
    /// Returns a [`ComponentError`]; see [`ComponentError::exit_code`] for
    /// how failures map to process exit codes.
    pub fn run(&self) -> Result<RunSummary, ComponentError> {
        let plan = self.plan()?;
        let options = plan.settings.destination;

        let table = TableDefinition {
            name: TABLE_NAME.to_owned(),
            columns: PageRecord::COLUMNS.iter().map(|&c| c.to_owned()).collect(),
            primary_key: vec!["id".to_owned()],
            incremental: options.incremental,
        };
        let mut writer = TableWriter::create(&self.data_dir, table)?;

        let mut client = ConfluenceClient::from_settings(&plan.settings);
        if let Some(limit) = self.page_limit {
            client = client.with_page_limit(limit);
        }

        let mut pages = client.fetch_pages(plan.since, options.beautify);
        for page in pages.by_ref() {
            writer.write(&page?)?;
        }
        let fetched = pages.fetched();
        let rows_written = writer.finish()?;

        let next_state = State::for_run(self.started_at);
        next_state.save(&self.data_dir.out_state_path())?;

        info!(
            "The component has fetched {} new Confluence documents.",
            fetched
        );

        Ok(RunSummary {
            fetched,
            rows_written,
            started_from: plan.started_from,
            last_run: next_state.last_run.unwrap_or_default(),
            incremental: options.incremental,
        })
    }
}
