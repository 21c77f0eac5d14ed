//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, ListCommand, PaymentCommand, PriceCommand, ProductsCommand, ShowCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for validating and querying per-city parking configuration.
#[derive(Parser)]
#[command(name = "rotativo")]
#[command(
    version,
    about = "Validate and query per-city parking configuration",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Tenant (city) to operate on
    #[arg(long, value_name = "TENANT", global = true, env = "ROTATIVO_TENANT")]
    pub tenant: Option<String>,

    /// Directory holding the city documents
    #[arg(long, value_name = "PATH", global = true, env = "ROTATIVO_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate the configuration of one or every tenant
    Validate(ValidateCommand),

    /// List the configured tenants
    List(ListCommand),

    /// Show the validated configuration of a tenant
    Show(ShowCommand),

    /// Price a parking session
    Price(PriceCommand),

    /// List the credit bundles offered for purchase
    Products(ProductsCommand),

    /// Check whether a payment method is enabled
    Payment(PaymentCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
