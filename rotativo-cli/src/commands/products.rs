//! Products command implementation.

use crate::error::CliError;
use crate::utils::{load_active_config, vehicle_type_or_default, GlobalOptions};
use clap::Args;

/// List the credit bundles offered for purchase.
#[derive(Args)]
pub struct ProductsCommand {
    /// Vehicle type code (defaults to the tenant's default vehicle type)
    #[arg(long, value_name = "CODE")]
    pub vehicle_type: Option<u32>,
}

impl ProductsCommand {
    /// Execute the products command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_active_config(global)?;

        if !config.purchase_enabled() {
            return Err(CliError::SemanticFailure(format!(
                "Purchase is disabled for {}",
                config.city()
            )));
        }

        let vehicle_type = vehicle_type_or_default(&config, self.vehicle_type);
        let options = config.purchase_options(vehicle_type)?;

        if !global.quiet {
            if let Some(min) = config.minimum_purchase_credits(vehicle_type) {
                println!("Minimum purchase: {min} credit(s)");
            }
        }

        for product in options {
            println!("{}\t{}", product.credits, product.price);
        }

        Ok(())
    }
}
