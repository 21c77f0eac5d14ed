//! List command implementation.
//!
//! This module implements the `list` command, which displays the configured
//! tenants as a table, JSON or YAML.

use crate::error::CliError;
use crate::utils::{open_registry, print_serialized, DataFormat, GlobalOptions};
use clap::{Args, ValueEnum};
use rotativo::CityConfigs;
use serde::Serialize;
use std::io::Write;

/// Column headers for table output.
const COLUMN_HEADERS: [&str; 4] = ["tenant", "city", "android_package", "ios_package"];

/// List the configured tenants.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "ROTATIVO_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// One row of the listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TenantSummary<'a> {
    tenant: &'a str,
    city: &'a str,
    android_package: &'a str,
    ios_package: &'a str,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_, registry) = open_registry(global)?;
        let configs = registry.load_all()?;
        let rows = summarize(&configs);

        match self.format {
            OutputFormat::Table => format_as_table(&rows),
            OutputFormat::Json => print_serialized(&rows, DataFormat::Json),
            OutputFormat::Yaml => print_serialized(&rows, DataFormat::Yaml),
        }
    }
}

fn summarize(configs: &CityConfigs) -> Vec<TenantSummary<'_>> {
    configs
        .iter()
        .map(|(tenant, config)| TenantSummary {
            tenant: tenant.as_str(),
            city: config.city(),
            android_package: &config.document().android_package,
            ios_package: &config.document().ios_package,
        })
        .collect()
}

/// Format tenants as a human-readable table.
fn format_as_table(rows: &[TenantSummary<'_>]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}",
            row.tenant, row.city, row.android_package, row.ios_package
        )?;
    }

    Ok(())
}
