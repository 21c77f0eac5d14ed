//! Tenant resolution.
//!
//! [`CityConfigRegistry`] turns raw documents from a [`ConfigSource`] into
//! validated [`CityConfig`] values, one tenant at a time for a single-city
//! build or all at once for multi-tenant serving.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::city::CityConfig;
use crate::config::{ConfigSource, DirectorySource};
use crate::error::{Error, Result};
use crate::tenant::TenantId;

/// Validated configurations keyed by tenant.
pub type CityConfigs = BTreeMap<TenantId, CityConfig>;

/// Resolves validated city configurations from a source.
///
/// Loading is pure with respect to the source: the registry keeps no cache,
/// and loading the same tenant twice yields equal values.
///
/// # Examples
///
/// ```no_run
/// use rotativo::{CityConfigRegistry, TenantId};
///
/// let registry = CityConfigRegistry::from_dir("assets/config/cities");
/// let config = registry.load(&TenantId::new("ouroPreto").unwrap()).unwrap();
/// println!("{} ({})", config.city(), config.tenant());
/// ```
#[derive(Debug, Clone)]
pub struct CityConfigRegistry<S> {
    source: S,
}

impl CityConfigRegistry<DirectorySource> {
    /// Creates a registry reading documents from a directory.
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(DirectorySource::new(root))
    }
}

impl<S: ConfigSource> CityConfigRegistry<S> {
    /// Creates a registry over `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// List the tenants of the source, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be enumerated or holds a tenant
    /// twice.
    pub fn tenants(&self) -> Result<Vec<TenantId>> {
        self.source.tenants()
    }

    /// Load and validate the configuration of one tenant.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownTenant`] if the source has no such tenant.
    /// - [`Error::DuplicateTenant`] if the source holds it more than once.
    /// - [`Error::Validation`] if the document is malformed or violates an
    ///   invariant.
    pub fn load(&self, tenant: &TenantId) -> Result<CityConfig> {
        let document = self.source.read(tenant)?;
        let config = CityConfig::from_document(tenant.clone(), document).map_err(|e| {
            log::debug!("Configuration of {tenant} rejected: {e}");
            e
        })?;
        log::debug!("Loaded configuration of {tenant} ({})", config.city());
        Ok(config)
    }

    /// Load and validate every tenant of the source.
    ///
    /// Either every configuration is valid and returned, or the first
    /// failure is. Beyond per-document validation, no two tenants may share
    /// an Android or iOS application identifier.
    ///
    /// # Errors
    ///
    /// Returns the first loading or validation error encountered.
    pub fn load_all(&self) -> Result<CityConfigs> {
        let mut configs = CityConfigs::new();
        let mut android: HashMap<String, TenantId> = HashMap::new();
        let mut ios: HashMap<String, TenantId> = HashMap::new();

        for tenant in self.tenants()? {
            if configs.contains_key(&tenant) {
                return Err(Error::DuplicateTenant {
                    tenant: tenant.to_string(),
                    details: "listed twice by the configuration source".into(),
                });
            }

            let config = self.load(&tenant)?;
            let document = config.document();
            Self::claim(&mut android, "androidPackage", &document.android_package, &tenant)?;
            Self::claim(&mut ios, "iosPackage", &document.ios_package, &tenant)?;
            configs.insert(tenant, config);
        }

        log::debug!("Loaded {} city configuration(s)", configs.len());
        Ok(configs)
    }

    /// Record that `tenant` uses application identifier `package`.
    fn claim(
        owners: &mut HashMap<String, TenantId>,
        field: &str,
        package: &str,
        tenant: &TenantId,
    ) -> Result<()> {
        if let Some(owner) = owners.get(package) {
            return Err(Error::Validation {
                field: format!("{tenant}.{field}"),
                reason: format!("Application identifier {package} is already used by {owner}"),
            });
        }
        owners.insert(package.to_string(), tenant.clone());
        Ok(())
    }
}
