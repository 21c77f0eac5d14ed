//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including settings resolution, configuration loading and output
//! formatting.

use crate::error::CliError;
use clap::ValueEnum;
use rotativo::config::{DirectorySource, VehicleType};
use rotativo::{CityConfig, CityConfigRegistry, Settings, SettingsBuilder};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Tenant to operate on.
    pub tenant: Option<String>,

    /// Directory holding the city documents.
    pub config_dir: Option<PathBuf>,
}

/// Resolve runtime settings from global options.
///
/// Environment fallbacks are already applied by clap, so the settings
/// builder does not read the environment again.
pub fn load_settings(global: &GlobalOptions) -> Result<Settings, CliError> {
    let mut builder = SettingsBuilder::new().skip_env();

    if let Some(ref tenant) = global.tenant {
        builder = builder.with_tenant(tenant.clone());
    }
    if let Some(ref dir) = global.config_dir {
        builder = builder.with_config_dir(dir.clone());
    }

    builder.build().map_err(|e| match e {
        // A malformed --tenant value is a usage error
        rotativo::Error::Validation { ref field, .. } if field == "tenant" => {
            CliError::InvalidArguments(e.to_string())
        }
        _ => CliError::Config(e.to_string()),
    })
}

/// Open the registry over the configured document directory.
pub fn open_registry(
    global: &GlobalOptions,
) -> Result<(Settings, CityConfigRegistry<DirectorySource>), CliError> {
    let settings = load_settings(global)?;
    let registry = settings.registry();
    log::debug!("Reading city documents from {}", settings.config_dir.display());
    Ok((settings, registry))
}

/// Load the validated configuration of the active tenant.
pub fn load_active_config(global: &GlobalOptions) -> Result<CityConfig, CliError> {
    let (settings, registry) = open_registry(global)?;
    let tenant = settings.require_tenant()?;
    Ok(registry.load(tenant)?)
}

/// Resolve a vehicle type argument, defaulting to the tenant's default.
pub fn vehicle_type_or_default(config: &CityConfig, code: Option<u32>) -> VehicleType {
    code.map_or_else(|| config.default_vehicle_type(), VehicleType::new)
}

/// Structured output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DataFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Write `value` to stdout in the given format.
pub fn print_serialized<T: Serialize>(value: &T, format: DataFormat) -> Result<(), CliError> {
    let rendered = match format {
        DataFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::SemanticFailure(format!("Failed to render JSON: {e}")))?,
        DataFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| CliError::SemanticFailure(format!("Failed to render YAML: {e}")))?,
    };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", rendered.trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(tenant: Option<&str>) -> GlobalOptions {
        GlobalOptions {
            verbose: false,
            quiet: true,
            tenant: tenant.map(str::to_string),
            config_dir: Some(PathBuf::from("/srv/rotativo/cities")),
        }
    }

    #[test]
    fn test_malformed_tenant_is_invalid_argument() {
        let err = load_settings(&global(Some("../demo"))).unwrap_err();
        assert!(matches!(err, CliError::InvalidArguments(_)));
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("tenant"));
    }

    #[test]
    fn test_settings_resolved_from_globals() {
        let settings = load_settings(&global(Some("ouroPreto"))).unwrap();
        assert_eq!(settings.tenant.map(|t| t.to_string()), Some("ouroPreto".to_string()));
        assert_eq!(settings.config_dir, PathBuf::from("/srv/rotativo/cities"));

        let settings = load_settings(&global(None)).unwrap();
        assert!(settings.tenant.is_none());
    }
}
