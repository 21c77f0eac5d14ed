#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # rotativo
//!
//! Per-city configuration for digital paid street parking.
//!
//! Every city ("tenant") served by the app ships a configuration document
//! describing its branding, store links, the vehicle types it regulates, the
//! price table for each of them, and how users may buy parking credits. This
//! library parses those documents, validates them, and answers the pricing
//! and purchase questions the rest of the app asks.
//!
//! ## Core Types
//!
//! - [`CityConfigRegistry`]: loads validated configurations from a source
//! - [`CityConfig`]: a validated configuration and its queries
//! - [`TenantId`] and [`Price`]: tenant identifiers and money amounts
//! - [`Error`], [`LookupError`] and [`Result`]: error handling types
//! - [`Settings`]: tenant selection and document location
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use rotativo::config::{BundledSource, DocumentFormat, VehicleType};
//! use rotativo::{CityConfigRegistry, Price, TenantId};
//!
//! let document = r#"{
//!     "city": "Demo",
//!     "domain": "demo.rotativodigital.com.br",
//!     "latitude": -20.38, "longitude": -43.5,
//!     "downloadLink": "https://rotativodigital.com.br/app",
//!     "termsLink": "https://rotativodigital.com.br/termos",
//!     "androidPackage": "com.rotativodigital",
//!     "iosPackage": "com.rotativodigital.app",
//!     "vehicleTypes": [1],
//!     "mainLogo": "logo.png", "logoMenu": "logo_menu.png",
//!     "balance": {"showBy": "real", "showDetails": true},
//!     "parkingRules": {"1": [
//!         {"time": 60, "price": 2.0, "credits": 1},
//!         {"time": 120, "price": 3.5, "credits": 2}
//!     ]},
//!     "purchase": {
//!         "vehicleTypeDefault": 1, "showBy": "real", "chargeback": false,
//!         "minCreditsByVehicle": {"1": 1},
//!         "products": {"1": [{"credits": 2, "price": 3.5}]},
//!         "payment": {"creditCard": true, "billet": false, "pix": true}
//!     }
//! }"#;
//!
//! let source = BundledSource::new()
//!     .with_document("demo", DocumentFormat::Json, document)
//!     .unwrap();
//! let registry = CityConfigRegistry::new(source);
//! let config = registry.load(&TenantId::new("demo").unwrap()).unwrap();
//!
//! let car = VehicleType::new(1);
//! assert_eq!(config.price_for_duration(car, 90).unwrap(), Price::from_centavos(350));
//! assert!(config.is_payment_method_enabled("pix"));
//! ```

pub mod city;
pub mod config;
pub mod error;
pub mod logging;
pub mod price;
pub mod registry;
pub mod settings;
pub mod tenant;

// Re-export key types at crate root for convenience
pub use city::CityConfig;
pub use error::{Error, LookupError, Result, ValidationError};
pub use logging::{init_logger, LogLevel, Logger};
pub use price::Price;
pub use registry::{CityConfigRegistry, CityConfigs};
pub use settings::{Settings, SettingsBuilder};
pub use tenant::TenantId;
