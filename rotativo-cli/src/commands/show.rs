//! Show command implementation.

use crate::error::CliError;
use crate::utils::{load_active_config, print_serialized, DataFormat, GlobalOptions};
use clap::Args;

/// Show the validated configuration of the active tenant.
#[derive(Args)]
pub struct ShowCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "json", ignore_case = true)]
    pub format: DataFormat,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_active_config(global)?;
        print_serialized(&config, self.format)
    }
}
