//! Payment command implementation.

use crate::error::CliError;
use crate::utils::{load_active_config, GlobalOptions};
use clap::Args;

/// Check whether a payment method is enabled.
///
/// Without a method, lists every enabled method.
#[derive(Args)]
pub struct PaymentCommand {
    /// Payment method (creditCard, billet or pix)
    #[arg(value_name = "METHOD")]
    pub method: Option<String>,
}

impl PaymentCommand {
    /// Execute the payment command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_active_config(global)?;

        match self.method {
            Some(ref name) => {
                if config.is_payment_method_enabled(name) {
                    println!("enabled");
                } else {
                    println!("disabled");
                }
            }
            None => {
                for method in config.enabled_payment_methods() {
                    println!("{method}");
                }
            }
        }

        Ok(())
    }
}
