//! Price command implementation.
//!
//! Prices a parking session of a given length against the active tenant's
//! price table.

use crate::error::CliError;
use crate::utils::{load_active_config, vehicle_type_or_default, GlobalOptions};
use clap::Args;

/// Price a parking session.
#[derive(Args)]
pub struct PriceCommand {
    /// Vehicle type code (defaults to the tenant's default vehicle type)
    #[arg(long, value_name = "CODE")]
    pub vehicle_type: Option<u32>,

    /// Session length in minutes
    #[arg(long, value_name = "MINUTES")]
    pub minutes: u32,
}

impl PriceCommand {
    /// Execute the price command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.minutes == 0 {
            return Err(CliError::InvalidArguments(
                "--minutes must be greater than zero".to_string(),
            ));
        }

        let config = load_active_config(global)?;
        let vehicle_type = vehicle_type_or_default(&config, self.vehicle_type);
        let tier = config.tier_for_duration(vehicle_type, self.minutes)?;

        if global.quiet {
            println!("{}", tier.price);
        } else {
            println!(
                "{} ({} credit(s), {} min tier)",
                tier.price, tier.credits, tier.minutes
            );
        }

        Ok(())
    }
}
