//! `cpx check-config` command implementation.

use clap::Args;
use cpx_component::{DataDir, Extractor, RunPlan};

use super::DataDirArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check-config command.
#[derive(Args)]
pub(crate) struct CheckConfigArgs {
    #[command(flatten)]
    data: DataDirArgs,
}

impl CheckConfigArgs {
    /// Validate configuration and state without contacting Confluence.
    ///
    /// # Errors
    ///
    /// Returns an error if required parameters are missing or the stored
    /// state is unusable.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let plan = Extractor::new(DataDir::new(self.data.data_dir)).plan()?;
        print_plan(&output, &plan);
        Ok(())
    }
}

fn print_plan(output: &Output, plan: &RunPlan) {
    let settings = &plan.settings;
    output.success("Configuration is valid.");
    output.info(&format!("URL: {}", settings.url));
    output.info(&format!("Username: {}", settings.username));
    output.info(&format!("Beautify: {}", settings.destination.beautify));
    output.info(&format!("Incremental: {}", settings.destination.incremental));
    output.highlight(&format!(
        "Pages modified since {} will be fetched.",
        plan.started_from
    ));
}
