//! Tenant identifiers.
//!
//! A tenant is one municipality's parking program. Its identifier is the
//! app flavor name (`ouroPreto`, `conselheiroLafaiete`) and doubles as the
//! stem of the city document's file name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A validated tenant identifier.
///
/// Identifiers are 1 to 64 ASCII characters, start with a letter and
/// contain only letters, digits, `_` and `-`.
///
/// # Examples
///
/// ```
/// use rotativo::TenantId;
///
/// let tenant = TenantId::new("ouroPreto").unwrap();
/// assert_eq!(tenant.as_str(), "ouroPreto");
///
/// assert!(TenantId::new("").is_err());
/// assert!(TenantId::new("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Maximum identifier length.
    pub const MAX_LEN: usize = 64;

    /// Creates a tenant identifier, validating its syntax.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the identifier is empty, too long,
    /// does not start with a letter, or contains characters other than
    /// letters, digits, `_` and `-`.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();

        let Some(first) = value.chars().next() else {
            return Err(Self::invalid("cannot be empty"));
        };

        if value.len() > Self::MAX_LEN {
            return Err(Self::invalid(&format!(
                "cannot exceed {} characters",
                Self::MAX_LEN
            )));
        }

        if !first.is_ascii_alphabetic() {
            return Err(Self::invalid("must start with a letter"));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Self::invalid(&format!(
                "'{value}' may only contain letters, digits, '_' and '-'"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn invalid(reason: &str) -> Error {
        Error::Validation {
            field: "tenant".into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TenantId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for TenantId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TenantId> for String {
    fn from(tenant: TenantId) -> Self {
        tenant.0
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
