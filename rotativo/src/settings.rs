//! Runtime settings: which tenant is active and where its documents live.
//!
//! Settings are resolved with the following precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`SettingsBuilder::with_tenant`] and
//!    [`SettingsBuilder::with_config_dir`], typically from CLI flags)
//! 2. Environment variables (`ROTATIVO_TENANT`, `ROTATIVO_CONFIG_DIR`)
//! 3. Built-in defaults (no tenant, [`DEFAULT_CONFIG_DIR`])

use std::env;
use std::path::{Path, PathBuf};

use crate::config::DirectorySource;
use crate::error::{Error, Result};
use crate::registry::CityConfigRegistry;
use crate::tenant::TenantId;

/// Environment variable selecting the active tenant.
pub const TENANT_ENV: &str = "ROTATIVO_TENANT";

/// Environment variable overriding the document directory.
pub const CONFIG_DIR_ENV: &str = "ROTATIVO_CONFIG_DIR";

/// Directory holding the bundled city documents, relative to the app root.
pub const DEFAULT_CONFIG_DIR: &str = "assets/config/cities";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The active tenant, if one was selected.
    pub tenant: Option<TenantId>,

    /// Directory holding the city documents.
    pub config_dir: PathBuf,
}

impl Settings {
    /// Returns the active tenant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTenantSelected`] if no tenant was selected.
    pub fn require_tenant(&self) -> Result<&TenantId> {
        self.tenant.as_ref().ok_or_else(|| Error::NoTenantSelected {
            hint: format!("use --tenant or set {TENANT_ENV}"),
        })
    }

    /// Creates a registry over the configured document directory.
    #[must_use]
    pub fn registry(&self) -> CityConfigRegistry<DirectorySource> {
        CityConfigRegistry::from_dir(&self.config_dir)
    }
}

/// Builder for [`Settings`].
///
/// # Examples
///
/// ```
/// use rotativo::settings::SettingsBuilder;
///
/// let settings = SettingsBuilder::new()
///     .skip_env()
///     .with_tenant("ouroPreto")
///     .with_config_dir("/srv/rotativo/cities")
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.tenant.unwrap().as_str(), "ouroPreto");
/// assert_eq!(settings.config_dir.to_str(), Some("/srv/rotativo/cities"));
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    tenant: Option<String>,
    config_dir: Option<PathBuf>,
    skip_env: bool,
}

impl SettingsBuilder {
    /// Creates a builder with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the active tenant.
    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// Overrides the document directory.
    #[must_use]
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// Ignores `ROTATIVO_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Resolve the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected tenant identifier is invalid or the
    /// document directory needs home expansion and no home directory is
    /// known.
    pub fn build(self) -> Result<Settings> {
        let (env_tenant, env_dir) = if self.skip_env {
            (None, None)
        } else {
            (
                Self::read_env(TENANT_ENV),
                Self::read_env(CONFIG_DIR_ENV).map(PathBuf::from),
            )
        };

        let tenant = self
            .tenant
            .or(env_tenant)
            .map(TenantId::new)
            .transpose()?;

        let config_dir = self
            .config_dir
            .or(env_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        Ok(Settings {
            tenant,
            config_dir: expand_tilde(&config_dir)?,
        })
    }

    /// Read a non-empty environment variable.
    fn read_env(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.trim().is_empty())
    }
}

/// Expand a leading `~` to the home directory.
///
/// # Errors
///
/// Returns an error if the path starts with `~` and the home directory
/// cannot be determined.
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Could not determine home directory".into(),
    })?;
    Ok(home.join(rest))
}
