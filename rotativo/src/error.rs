//! Error types for the rotativo library.
//!
//! Loading failures (malformed documents, invariant violations, missing or
//! duplicated tenants) are reported through [`Error`]. Queries against an
//! already validated configuration fail with [`LookupError`], which callers
//! are expected to recover from locally.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::VehicleType;

/// Result type alias for operations that may fail with a rotativo error.
///
/// # Examples
///
/// ```
/// use rotativo::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(60)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the rotativo library.
#[derive(Debug, Error)]
pub enum Error {
    /// A city document is malformed or violates an invariant.
    #[error("validation error for '{field}': {reason}")]
    Validation {
        /// Dotted path of the offending field.
        field: String,
        /// A description of the validation failure.
        reason: String,
    },

    /// A query against a loaded configuration failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The configuration source holds no document for the tenant.
    #[error("unknown tenant: {tenant}")]
    UnknownTenant {
        /// The tenant identifier that was requested.
        tenant: String,
    },

    /// No tenant was selected for an operation that needs one.
    #[error("no tenant selected: {hint}")]
    NoTenantSelected {
        /// How to select a tenant.
        hint: String,
    },

    /// The same tenant identifier was found more than once.
    #[error("duplicate tenant '{tenant}': {details}")]
    DuplicateTenant {
        /// The duplicated tenant identifier.
        tenant: String,
        /// Where the duplicates were found.
        details: String,
    },

    /// A configuration path could not be used.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if error is a validation failure of a city document.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotativo::Error;
    ///
    /// let err = Error::Validation {
    ///     field: "city".to_string(),
    ///     reason: "cannot be empty".to_string(),
    /// };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns the lookup error wrapped by this error, if any.
    #[must_use]
    pub fn as_lookup(&self) -> Option<&LookupError> {
        match self {
            Self::Lookup(err) => Some(err),
            _ => None,
        }
    }
}

/// A single invariant violation found while validating a city document.
///
/// Validation stops at the first violation, so one document yields at most
/// one `ValidationError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `parkingRules.1[2].time`).
    pub field: String,
    /// A description of the validation failure.
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            reason: err.reason,
        }
    }
}

/// Failure of a pricing or purchase query against a validated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The vehicle type has no rules in the configuration.
    #[error("unknown vehicle type {vehicle_type}")]
    UnknownVehicleType {
        /// The vehicle type that was requested.
        vehicle_type: VehicleType,
    },

    /// The requested duration is longer than the largest configured tier.
    #[error(
        "requested duration of {requested} min exceeds the maximum of {maximum} min for vehicle type {vehicle_type}"
    )]
    DurationExceedsMaximum {
        /// The vehicle type that was requested.
        vehicle_type: VehicleType,
        /// The requested duration in minutes.
        requested: u32,
        /// The largest configured duration in minutes.
        maximum: u32,
    },

    /// The requested duration is not strictly positive.
    #[error("invalid duration of {requested} min: must be greater than zero")]
    InvalidDuration {
        /// The requested duration in minutes.
        requested: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "parkingRules.1".to_string(),
            reason: "durations must be strictly increasing".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("parkingRules.1"));
        assert!(display.contains("strictly increasing"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: Error = ValidationError::new("city", "cannot be empty").into();
        match err {
            Error::Validation { field, reason } => {
                assert_eq!(field, "city");
                assert_eq!(reason, "cannot be empty");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_vehicle_type_error() {
        let err = LookupError::UnknownVehicleType {
            vehicle_type: VehicleType::new(7),
        };
        let display = format!("{err}");
        assert!(display.contains("unknown vehicle type"));
        assert!(display.contains('7'));
    }

    #[test]
    fn test_duration_exceeds_maximum_error() {
        let err = LookupError::DurationExceedsMaximum {
            vehicle_type: VehicleType::new(1),
            requested: 200,
            maximum: 120,
        };
        let display = format!("{err}");
        assert!(display.contains("200"));
        assert!(display.contains("120"));
    }

    #[test]
    fn test_lookup_error_is_not_validation() {
        let err: Error = LookupError::InvalidDuration { requested: 0 }.into();
        assert!(!err.is_validation());
        assert_eq!(
            err.as_lookup(),
            Some(&LookupError::InvalidDuration { requested: 0 })
        );
    }

    #[test]
    fn test_unknown_tenant_error() {
        let err = Error::UnknownTenant {
            tenant: "ouroPreto".to_string(),
        };
        assert_eq!(format!("{err}"), "unknown tenant: ouroPreto");
    }

    #[test]
    fn test_no_tenant_selected_error() {
        let err = Error::NoTenantSelected {
            hint: "set ROTATIVO_TENANT".to_string(),
        };
        assert!(format!("{err}").contains("ROTATIVO_TENANT"));
    }

    #[test]
    fn test_duplicate_tenant_error() {
        let err = Error::DuplicateTenant {
            tenant: "vicosa".to_string(),
            details: "vicosa.json and vicosa.yaml".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("duplicate tenant"));
        assert!(display.contains("vicosa.yaml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }
}
