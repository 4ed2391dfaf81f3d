//! `cpx run` command implementation.

use clap::Args;
use cpx_component::{DataDir, Extractor, RunSummary};

use super::DataDirArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the run command.
#[derive(Args)]
pub(crate) struct RunArgs {
    #[command(flatten)]
    data: DataDirArgs,

    /// Enable verbose output (progress logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunArgs {
    /// Execute one extraction run.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete, Confluence
    /// cannot be read, or output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let summary = Extractor::new(DataDir::new(self.data.data_dir)).run()?;
        print_run_summary(&output, &summary);
        Ok(())
    }
}

fn print_run_summary(output: &Output, summary: &RunSummary) {
    output.success(&format!(
        "The component has fetched {} new Confluence documents.",
        summary.fetched
    ));
    output.info(&format!("Modified since: {}", summary.started_from));
    output.info(&format!("Rows written: {}", summary.rows_written));
    output.info(&format!(
        "Load mode: {}",
        if summary.incremental {
            "incremental"
        } else {
            "full"
        }
    ));
    output.info(&format!("Next run starts from: {}", summary.last_run));
}
