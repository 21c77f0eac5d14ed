//! Main entry point for the rotativo CLI.
//!
//! This is the command-line interface for the per-city parking
//! configuration. It provides commands for inspecting tenants:
//! - `validate`: Validate one or every city configuration
//! - `list`: List the configured tenants
//! - `show`: Show a validated configuration
//! - `price`, `products`, `payment`: Query pricing and purchase rules

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Route library diagnostics to stderr based on verbosity
    if let Err(e) = rotativo::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: logger already installed: {e}");
    }

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        tenant: cli.tenant,
        config_dir: cli.config_dir,
    };

    let result = match cli.command {
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Price(cmd) => cmd.execute(&global),
        cli::Command::Products(cmd) => cmd.execute(&global),
        cli::Command::Payment(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
