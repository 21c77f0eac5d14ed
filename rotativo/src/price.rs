//! Monetary amounts in Brazilian reais.
//!
//! City documents carry prices as decimal numbers (`2.5`). They are held as
//! an integer amount of centavos so that comparisons and equality are exact.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// An amount of money in centavos.
///
/// Negative amounts can be represented so that a malformed document can be
/// parsed and then rejected by validation with a precise field path.
///
/// # Examples
///
/// ```
/// use rotativo::Price;
///
/// let price = Price::from_centavos(350);
/// assert_eq!(price.centavos(), 350);
/// assert_eq!(price.to_string(), "R$ 3,50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates a price from an amount of centavos.
    #[must_use]
    pub const fn from_centavos(centavos: i64) -> Self {
        Self(centavos)
    }

    /// Creates a price from a decimal amount of reais, rounded to the
    /// nearest centavo.
    ///
    /// Returns `None` for non-finite amounts or amounts outside the range
    /// representable in centavos.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotativo::Price;
    ///
    /// assert_eq!(Price::from_reais(2.5), Some(Price::from_centavos(250)));
    /// assert_eq!(Price::from_reais(f64::NAN), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_reais(reais: f64) -> Option<Self> {
        let centavos = (reais * 100.0).round();
        if !centavos.is_finite() || centavos.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(centavos as i64))
    }

    /// Returns the amount in centavos.
    #[must_use]
    pub const fn centavos(self) -> i64 {
        self.0
    }

    /// Returns the amount in reais as a decimal number.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reais(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}R$ {},{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.reais())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PriceVisitor;

        impl Visitor<'_> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal amount of reais")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
                v.checked_mul(100)
                    .map(Price)
                    .ok_or_else(|| E::custom(format!("amount out of range: {v}")))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Price)
                    .ok_or_else(|| E::custom(format!("amount out of range: {v}")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
                Price::from_reais(v).ok_or_else(|| E::custom(format!("invalid amount: {v}")))
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}
