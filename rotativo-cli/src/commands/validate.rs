//! Command to validate city configurations.

use crate::error::CliError;
use crate::utils::{open_registry, GlobalOptions};
use clap::Args;
use rotativo::Error;

/// Validate the configuration of the active tenant, or of every tenant.
#[derive(Args)]
pub struct ValidateCommand {
    /// Validate every tenant in the config directory
    #[arg(long)]
    pub all: bool,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (settings, registry) = open_registry(global)?;

        let result = if self.all {
            registry.load_all().map(|configs| configs.len())
        } else {
            let tenant = settings.require_tenant()?;
            registry.load(tenant).map(|_| 1)
        };

        match result {
            Ok(count) => {
                if self.all && !global.quiet {
                    println!("Validated {count} tenant(s)");
                }
                println!("Configuration is valid");
                Ok(())
            }
            Err(e @ (Error::Validation { .. } | Error::DuplicateTenant { .. })) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }
}
