//! CLI command implementations.

pub(crate) mod check_config;
pub(crate) mod run;

use std::path::PathBuf;

use clap::Args;

pub(crate) use check_config::CheckConfigArgs;
pub(crate) use run::RunArgs;

/// Data directory location shared by all commands.
#[derive(Args)]
pub(crate) struct DataDirArgs {
    /// Component data directory (config.json, in/, out/).
    #[arg(short, long, env = "KBC_DATADIR", default_value = "/data")]
    pub data_dir: PathBuf,
}
