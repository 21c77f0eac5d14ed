//! City configuration documents.
//!
//! This module provides the per-city configuration layer:
//! - the document schema, mirroring the JSON bundled with each app flavor
//! - validation of cross-field invariants
//! - document sources (a directory of files, or documents embedded in the
//!   binary)
//!
//! Documents become usable [`CityConfig`](crate::CityConfig) values only
//! through [`CityConfigRegistry`](crate::CityConfigRegistry), which runs the
//! validator on every load.
//!
//! # Examples
//!
//! Loading every city bundled in a directory:
//!
//! ```no_run
//! use rotativo::CityConfigRegistry;
//!
//! let registry = CityConfigRegistry::from_dir("assets/config/cities");
//! for (tenant, config) in registry.load_all().unwrap() {
//!     println!("{tenant}: {}", config.city());
//! }
//! ```
//!
//! Parsing and validating a single document:
//!
//! ```
//! use rotativo::config::DocumentFormat;
//!
//! let result = DocumentFormat::Json.parse(r#"{"city": ""}"#, "inline");
//! assert!(result.is_err());
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

#[cfg(test)]
pub(crate) use loader::MockConfigSource;
pub use loader::{BundledSource, ConfigSource, DirectorySource, DocumentFormat};
pub use schema::{
    BalanceDisplay, CityDocument, FaqEntry, ParkingTier, PaymentMethod, PaymentMethods,
    PurchaseConfig, PurchaseProduct, ShowBy, VehicleType,
};
pub use validator::CityConfigValidator;
