//! Build script for rotativo-cli.
//!
//! This script generates man pages at build time using clap_mangen: one
//! for the binary and one per subcommand (`rotativo-<subcommand>.1`), all
//! placed in OUT_DIR/man for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("rotativo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate and query per-city parking configuration")
        .long_about(
            "Command-line tool for validating and querying the per-city configuration of the rotativo digital parking app",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tenant")
                .long("tenant")
                .help("Tenant (city) to operate on")
                .value_name("TENANT")
                .global(true)
                .env("ROTATIVO_TENANT"),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory holding the city documents")
                .value_name("PATH")
                .global(true)
                .env("ROTATIVO_CONFIG_DIR"),
        )
        .subcommands(vec![
            Command::new("validate")
                .about("Validate the configuration of one or every tenant")
                .long_about("Load and validate the active tenant, or every tenant with --all")
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Validate every tenant in the config directory")
                        .action(clap::ArgAction::SetTrue),
                ),
            Command::new("list")
                .about("List the configured tenants")
                .long_about("Display every tenant with its city name and application identifiers")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Output format")
                        .value_parser(["table", "json", "yaml"])
                        .default_value("table")
                        .ignore_case(true)
                        .env("ROTATIVO_OUTPUT_FORMAT"),
                ),
            Command::new("show")
                .about("Show the validated configuration of a tenant")
                .long_about("Print the validated configuration of the active tenant as JSON or YAML")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Output format")
                        .value_parser(["json", "yaml"])
                        .default_value("json")
                        .ignore_case(true),
                ),
            Command::new("price")
                .about("Price a parking session")
                .long_about("Select the tier charged for a session and print its price and credits")
                .arg(vehicle_type_arg())
                .arg(
                    Arg::new("minutes")
                        .long("minutes")
                        .help("Session length in minutes")
                        .value_name("MINUTES")
                        .required(true),
                ),
            Command::new("products")
                .about("List the credit bundles offered for purchase")
                .long_about("Display the purchasable credit bundles of a vehicle type")
                .arg(vehicle_type_arg()),
            Command::new("payment")
                .about("Check whether a payment method is enabled")
                .long_about("Print whether a payment method can be used to buy credits")
                .arg(
                    Arg::new("method")
                        .help("Payment method (creditCard, billet or pix)")
                        .value_name("METHOD"),
                ),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .required(true),
                ),
        ])
}

/// `--vehicle-type`, shared by `price` and `products`.
fn vehicle_type_arg() -> Arg {
    Arg::new("vehicle-type")
        .long("vehicle-type")
        .help("Vehicle type code (defaults to the tenant's default vehicle type)")
        .value_name("CODE")
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    for sub in app.get_subcommands() {
        let name = format!("rotativo-{}", sub.get_name());
        let mut buffer = Vec::new();
        Man::new(sub.clone())
            .title(name.to_uppercase())
            .render(&mut buffer)
            .unwrap();
        fs::write(man_dir.join(format!("{name}.1")), buffer).unwrap();
    }

    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("rotativo.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
