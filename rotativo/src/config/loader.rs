//! City document discovery and loading.
//!
//! Each app flavor bundles one document per city. This module reads those
//! documents either from a directory (`assets/config/cities/<tenant>.json`)
//! or from documents embedded in the binary, and parses them according to
//! their format.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{unique_keys, CityDocument};
use crate::error::{Error, Result};
use crate::tenant::TenantId;

/// Serialization format of a city document.
///
/// # Examples
///
/// ```
/// use rotativo::config::DocumentFormat;
/// use std::path::Path;
///
/// assert_eq!(DocumentFormat::from_path(Path::new("demo.json")), Some(DocumentFormat::Json));
/// assert_eq!(DocumentFormat::from_path(Path::new("demo.yml")), Some(DocumentFormat::Yaml));
/// assert_eq!(DocumentFormat::from_path(Path::new("demo.toml")), None);
/// assert_eq!(DocumentFormat::from_path(Path::new("demo.JSON")), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// JSON, as bundled by the mobile app.
    Json,
    /// YAML.
    Yaml,
}

impl DocumentFormat {
    /// File extensions recognized for city documents, in lookup order.
    pub const EXTENSIONS: [(&'static str, Self); 3] =
        [("json", Self::Json), ("yaml", Self::Yaml), ("yml", Self::Yaml)];

    /// Determine the format from a file extension. Extensions are matched
    /// exactly, so `demo.JSON` is not a city document.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::EXTENSIONS
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, format)| *format)
    }

    /// Parse a city document.
    ///
    /// `origin` names the document in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the text is not a well-formed city
    /// document.
    pub fn parse(self, text: &str, origin: &str) -> Result<CityDocument> {
        let parsed = match self {
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| match unique_keys::duplicate_field(&message) {
            Some(field) => Error::Validation {
                field: field.to_string(),
                reason: "Vehicle type is listed more than once".into(),
            },
            None => Error::Validation {
                field: origin.to_string(),
                reason: format!("Invalid {self}: {message}"),
            },
        })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

/// A static origin of raw city documents.
///
/// Implementations must report each tenant at most once from
/// [`tenants`](ConfigSource::tenants), failing with
/// [`Error::DuplicateTenant`] otherwise.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigSource {
    /// List the tenants available from this source, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be enumerated or holds the
    /// same tenant more than once.
    fn tenants(&self) -> Result<Vec<TenantId>>;

    /// Read and parse the document of one tenant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTenant`] if the source has no document for
    /// the tenant, or an error if it cannot be read or parsed.
    fn read(&self, tenant: &TenantId) -> Result<CityDocument>;
}

/// Reads city documents from `<root>/<tenant>.{json,yaml,yml}`.
///
/// # Examples
///
/// ```no_run
/// use rotativo::config::{ConfigSource, DirectorySource};
///
/// let source = DirectorySource::new("assets/config/cities");
/// for tenant in source.tenants().unwrap() {
///     println!("{tenant}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory documents are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the document files of `tenant`.
    fn candidates(&self, tenant: &TenantId) -> Vec<(PathBuf, DocumentFormat)> {
        DocumentFormat::EXTENSIONS
            .iter()
            .map(|(ext, format)| (self.root.join(format!("{tenant}.{ext}")), *format))
            .filter(|(path, _)| path.is_file())
            .collect()
    }

    /// Load and parse one document file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a well-formed
    /// city document.
    pub fn load_file(path: &Path) -> Result<CityDocument> {
        let format = DocumentFormat::from_path(path).ok_or_else(|| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "Unrecognized document extension".into(),
        })?;

        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read city document: {e}"),
        })?;

        format.parse(&contents, &path.display().to_string())
    }

    fn duplicate(tenant: &TenantId, paths: &[PathBuf]) -> Error {
        let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        Error::DuplicateTenant {
            tenant: tenant.to_string(),
            details: format!("found {}", names.join(" and ")),
        }
    }
}

impl ConfigSource for DirectorySource {
    fn tenants(&self) -> Result<Vec<TenantId>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::InvalidPath {
            path: self.root.clone(),
            reason: format!("Failed to read configuration directory: {e}"),
        })?;

        let mut found: BTreeMap<TenantId, Vec<PathBuf>> = BTreeMap::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || DocumentFormat::from_path(&path).is_none() {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match TenantId::new(stem) {
                Ok(tenant) => found.entry(tenant).or_default().push(path),
                Err(_) => log::warn!("Skipping {}: not a tenant identifier", path.display()),
            }
        }

        for (tenant, paths) in &found {
            if paths.len() > 1 {
                let mut paths = paths.clone();
                paths.sort();
                return Err(Self::duplicate(tenant, &paths));
            }
        }

        Ok(found.into_keys().collect())
    }

    fn read(&self, tenant: &TenantId) -> Result<CityDocument> {
        let candidates = self.candidates(tenant);
        match candidates.as_slice() {
            [] => Err(Error::UnknownTenant {
                tenant: tenant.to_string(),
            }),
            [(path, _)] => {
                log::debug!("Loading city document {}", path.display());
                Self::load_file(path)
            }
            _ => {
                let paths: Vec<PathBuf> = candidates.iter().map(|(p, _)| p.clone()).collect();
                Err(Self::duplicate(tenant, &paths))
            }
        }
    }
}

/// City documents held in memory, typically embedded with `include_str!`.
///
/// # Examples
///
/// ```
/// use rotativo::config::{BundledSource, ConfigSource, DocumentFormat};
/// use rotativo::TenantId;
///
/// let mut source = BundledSource::new();
/// source.insert(TenantId::new("demo").unwrap(), DocumentFormat::Json, "{}").unwrap();
///
/// // A second document for the same tenant is rejected.
/// assert!(source
///     .insert(TenantId::new("demo").unwrap(), DocumentFormat::Yaml, "{}")
///     .is_err());
/// assert_eq!(source.tenants().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BundledSource {
    documents: BTreeMap<TenantId, (DocumentFormat, String)>,
}

impl BundledSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the document of `tenant`.
    ///
    /// The text is parsed lazily, when the tenant is read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTenant`] if the tenant already has a
    /// document.
    pub fn insert(
        &mut self,
        tenant: TenantId,
        format: DocumentFormat,
        text: impl Into<String>,
    ) -> Result<()> {
        if self.documents.contains_key(&tenant) {
            return Err(Error::DuplicateTenant {
                details: "document already bundled".into(),
                tenant: tenant.to_string(),
            });
        }
        self.documents.insert(tenant, (format, text.into()));
        Ok(())
    }

    /// Builder-style variant of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is invalid or already bundled.
    pub fn with_document(
        mut self,
        tenant: &str,
        format: DocumentFormat,
        text: impl Into<String>,
    ) -> Result<Self> {
        self.insert(TenantId::new(tenant)?, format, text)?;
        Ok(self)
    }
}

impl ConfigSource for BundledSource {
    fn tenants(&self) -> Result<Vec<TenantId>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn read(&self, tenant: &TenantId) -> Result<CityDocument> {
        let (format, text) = self
            .documents
            .get(tenant)
            .ok_or_else(|| Error::UnknownTenant {
                tenant: tenant.to_string(),
            })?;
        format.parse(text, tenant.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"{
        "city": "Demo",
        "domain": "demo.rotativodigital.com.br",
        "latitude": -19.9,
        "longitude": -43.9,
        "downloadLink": "https://rotativodigital.com.br",
        "termsLink": "https://rotativodigital.com.br/termos",
        "androidPackage": "com.rotativodigital",
        "iosPackage": "com.rotativodigital.demo",
        "vehicleTypes": [1],
        "mainLogo": "logo.png",
        "logoMenu": "logo_menu.png",
        "balance": { "showBy": "real", "showDetails": false },
        "parkingRules": { "1": [{ "time": 60, "price": 2, "credits": 1 }] },
        "purchase": {
            "showBy": "real",
            "chargeback": false,
            "payment": { "creditCard": true, "billet": true, "pix": true }
        }
    }"#;

    fn tenant(id: &str) -> TenantId {
        TenantId::new(id).unwrap()
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = DocumentFormat::Json.parse("{ not json", "demo");
        let err = result.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("demo"));
    }

    #[test]
    fn test_parse_missing_field() {
        let result = DocumentFormat::Json.parse(r#"{"city": "Demo"}"#, "demo");
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_repeated_vehicle_type() {
        let text = DOCUMENT.replace(
            r#""parkingRules": { "1": [{ "time": 60, "price": 2, "credits": 1 }] }"#,
            r#""parkingRules": { "1": [{ "time": 60, "price": 5, "credits": 2 }], "1": [{ "time": 60, "price": 0.5, "credits": 1 }] }"#,
        );
        assert_ne!(text, DOCUMENT);

        match DocumentFormat::Json.parse(&text, "demo") {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "parkingRules.1"),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_extension_case_sensitive() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("demo.yaml")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("demo.JSON")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("demo.Yml")), None);
    }

    #[test]
    fn test_directory_skips_uppercase_extension() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("demo.JSON"), DOCUMENT).unwrap();
        fs::write(temp_dir.path().join("vicosa.json"), DOCUMENT).unwrap();

        let source = DirectorySource::new(temp_dir.path());
        assert_eq!(source.tenants().unwrap(), vec![tenant("vicosa")]);
        assert!(matches!(
            source.read(&tenant("demo")),
            Err(Error::UnknownTenant { .. })
        ));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = DirectorySource::load_file(Path::new("/nonexistent/path/demo.json"));
        assert!(matches!(result, Err(Error::InvalidPath { .. })));
    }

    #[test]
    fn test_load_unrecognized_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("demo.txt");
        fs::write(&path, DOCUMENT).unwrap();
        assert!(DirectorySource::load_file(&path).is_err());
    }

    #[test]
    fn test_directory_tenants_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("vicosa.json"), DOCUMENT).unwrap();
        fs::write(temp_dir.path().join("demo.json"), DOCUMENT).unwrap();
        fs::write(temp_dir.path().join("README.md"), "docs").unwrap();
        fs::write(temp_dir.path().join("cities.d.ts"), "types").unwrap();

        let source = DirectorySource::new(temp_dir.path());
        let tenants = source.tenants().unwrap();
        assert_eq!(tenants, vec![tenant("demo"), tenant("vicosa")]);
    }

    #[test]
    fn test_directory_duplicate_tenant() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("demo.json"), DOCUMENT).unwrap();
        fs::write(temp_dir.path().join("demo.yaml"), "city: Demo\n").unwrap();

        let source = DirectorySource::new(temp_dir.path());
        assert!(matches!(
            source.tenants(),
            Err(Error::DuplicateTenant { .. })
        ));
        assert!(matches!(
            source.read(&tenant("demo")),
            Err(Error::DuplicateTenant { .. })
        ));
    }

    #[test]
    fn test_directory_missing_root() {
        let source = DirectorySource::new("/nonexistent/rotativo/cities");
        assert!(matches!(source.tenants(), Err(Error::InvalidPath { .. })));
    }

    #[test]
    fn test_directory_read_unknown_tenant() {
        let temp_dir = TempDir::new().unwrap();
        let source = DirectorySource::new(temp_dir.path());
        assert!(matches!(
            source.read(&tenant("demo")),
            Err(Error::UnknownTenant { .. })
        ));
    }

    #[test]
    fn test_directory_read_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = r"
city: Demo
domain: demo.rotativodigital.com.br
latitude: -19.9
longitude: -43.9
downloadLink: https://rotativodigital.com.br
termsLink: https://rotativodigital.com.br/termos
androidPackage: com.rotativodigital
iosPackage: com.rotativodigital.demo
vehicleTypes: [1]
mainLogo: logo.png
logoMenu: logo_menu.png
balance: { showBy: real, showDetails: false }
parkingRules:
  1:
    - { time: 60, price: 2, credits: 1 }
purchase:
  showBy: real
  chargeback: false
  payment: { creditCard: true, billet: false }
";
        fs::write(temp_dir.path().join("demo.yml"), yaml).unwrap();

        let source = DirectorySource::new(temp_dir.path());
        let document = source.read(&tenant("demo")).unwrap();
        assert_eq!(document.city, "Demo");
    }

    #[test]
    fn test_bundled_source_read() {
        let source = BundledSource::new()
            .with_document("demo", DocumentFormat::Json, DOCUMENT)
            .unwrap();
        let document = source.read(&tenant("demo")).unwrap();
        assert_eq!(document.android_package, "com.rotativodigital");
        assert!(matches!(
            source.read(&tenant("vicosa")),
            Err(Error::UnknownTenant { .. })
        ));
    }
}
