//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `validate`: Validate the configuration of one or every tenant
//! - `list`: List the configured tenants
//! - `show`: Show the validated configuration of a tenant
//! - `price`: Price a parking session
//! - `products`: List the credit bundles offered for purchase
//! - `payment`: Check whether a payment method is enabled
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod list;
pub mod payment;
pub mod price;
pub mod products;
pub mod show;
pub mod validate;

pub use completions::CompletionsCommand;
pub use list::ListCommand;
pub use payment::PaymentCommand;
pub use price::PriceCommand;
pub use products::ProductsCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
