//! City document schema.
//!
//! This module defines the on-disk shape of one city's configuration, as
//! bundled with each app flavor. Field names follow the app's camelCase
//! wire format. Unknown fields are ignored so that newer documents can be
//! read by older builds.
//!
//! A [`CityDocument`] is untrusted until it has passed
//! [`CityConfigValidator`](crate::config::CityConfigValidator); only the
//! resulting [`CityConfig`](crate::CityConfig) is handed to consumers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::price::Price;

/// A numeric vehicle-type code (e.g. `1` for cars, `2` for motorcycles).
///
/// Codes are opaque to this crate; each city declares the codes it supports
/// in [`CityDocument::vehicle_types`].
///
/// # Examples
///
/// ```
/// use rotativo::config::VehicleType;
///
/// let car = VehicleType::new(1);
/// assert_eq!(car.code(), 1);
/// assert_eq!(car.to_string(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleType(u32);

impl VehicleType {
    /// Creates a vehicle type from its numeric code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }
}

impl From<u32> for VehicleType {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete configuration document for one city.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CityDocument {
    /// Display name of the city.
    pub city: String,

    /// Backend domain serving this city.
    pub domain: String,

    /// Map centering latitude.
    pub latitude: f64,

    /// Map centering longitude.
    pub longitude: f64,

    /// Store download link shared with other users.
    pub download_link: String,

    /// Terms of use link.
    pub terms_link: String,

    /// Android application identifier of this flavor.
    pub android_package: String,

    /// iOS bundle identifier of this flavor.
    pub ios_package: String,

    /// Support WhatsApp number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,

    /// Support chatbot URL.
    #[serde(
        default,
        rename = "chatBotURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub chat_bot_url: Option<String>,

    /// Product codes offered by the city.
    #[serde(default)]
    pub products: Vec<u32>,

    /// Vehicle types supported by the city.
    pub vehicle_types: Vec<VehicleType>,

    /// Main logo asset reference.
    pub main_logo: String,

    /// Menu logo asset reference.
    pub logo_menu: String,

    /// How stored value is presented on the balance screen.
    pub balance: BalanceDisplay,

    /// Parking price tiers per vehicle type.
    #[serde(deserialize_with = "unique_keys::parking_rules")]
    pub parking_rules: BTreeMap<VehicleType, Vec<ParkingTier>>,

    /// Free-form description of the parking rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_rules_text: Option<String>,

    /// Credit purchase settings.
    pub purchase: PurchaseConfig,

    /// Frequently asked questions, in display order.
    #[serde(default)]
    pub faq: Vec<FaqEntry>,
}

/// How stored value is presented to the user.
///
/// # Examples
///
/// ```
/// use rotativo::config::ShowBy;
///
/// let show_by: ShowBy = "credits".parse().unwrap();
/// assert_eq!(show_by, ShowBy::Credits);
/// assert_eq!(ShowBy::Real.to_string(), "real");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShowBy {
    /// Amounts are shown as credits.
    Credits,
    /// Amounts are shown in reais.
    Real,
}

impl fmt::Display for ShowBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credits => write!(f, "credits"),
            Self::Real => write!(f, "real"),
        }
    }
}

impl FromStr for ShowBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credits" => Ok(Self::Credits),
            "real" => Ok(Self::Real),
            _ => Err(format!("invalid showBy value: {s}")),
        }
    }
}

/// Balance screen settings.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDisplay {
    /// Presentation unit of the balance.
    pub show_by: ShowBy,

    /// Whether a breakdown of the balance is shown.
    pub show_details: bool,
}

/// One step of a vehicle type's price ladder.
///
/// A tier covers parking sessions up to `minutes` long.
///
/// # Examples
///
/// ```
/// use rotativo::config::ParkingTier;
/// use rotativo::Price;
///
/// let tier: ParkingTier = serde_json::from_str(r#"{"time": 60, "price": 3, "credits": 2}"#).unwrap();
/// assert_eq!(tier.minutes, 60);
/// assert_eq!(tier.price, Price::from_centavos(300));
/// assert_eq!(tier.credits, 2);
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct ParkingTier {
    /// Session length covered by this tier, in minutes.
    #[serde(rename = "time")]
    pub minutes: u32,

    /// Price of the session in reais.
    pub price: Price,

    /// Cost of the session in credits.
    pub credits: u32,
}

/// Credit purchase settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseConfig {
    /// Whether purchase flows are offered at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Vehicle type preselected on the purchase screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type_default: Option<VehicleType>,

    /// Presentation unit of the purchase screen.
    pub show_by: ShowBy,

    /// Whether chargeback requests are allowed.
    pub chargeback: bool,

    /// Minimum purchasable credits per vehicle type.
    #[serde(default, deserialize_with = "unique_keys::min_credits_by_vehicle")]
    pub min_credits_by_vehicle: BTreeMap<VehicleType, u32>,

    /// Purchasable bundles per vehicle type, in display order.
    #[serde(default, deserialize_with = "unique_keys::purchase_products")]
    pub products: BTreeMap<VehicleType, Vec<PurchaseProduct>>,

    /// Enabled payment rails.
    pub payment: PaymentMethods,
}

fn default_true() -> bool {
    true
}

/// A purchasable bundle of credits.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct PurchaseProduct {
    /// Credits granted by the bundle.
    pub credits: u32,

    /// Price of the bundle in reais.
    pub price: Price,
}

/// Payment rail availability.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethods {
    /// Credit card payments.
    pub credit_card: bool,

    /// Bank slip ("boleto") payments.
    pub billet: bool,

    /// PIX instant payments.
    #[serde(default)]
    pub pix: bool,
}

impl PaymentMethods {
    /// Returns `true` if `method` is enabled.
    #[must_use]
    pub const fn is_enabled(&self, method: PaymentMethod) -> bool {
        match method {
            PaymentMethod::CreditCard => self.credit_card,
            PaymentMethod::Billet => self.billet,
            PaymentMethod::Pix => self.pix,
        }
    }

    /// Returns `true` if at least one payment method is enabled.
    #[must_use]
    pub const fn any_enabled(&self) -> bool {
        self.credit_card || self.billet || self.pix
    }

    /// Iterates over the enabled payment methods.
    pub fn enabled(&self) -> impl Iterator<Item = PaymentMethod> + '_ {
        PaymentMethod::ALL
            .into_iter()
            .filter(|method| self.is_enabled(*method))
    }
}

/// A payment rail known to this schema.
///
/// # Examples
///
/// ```
/// use rotativo::config::PaymentMethod;
///
/// assert_eq!("pix".parse::<PaymentMethod>(), Ok(PaymentMethod::Pix));
/// assert_eq!("credit_card".parse::<PaymentMethod>(), Ok(PaymentMethod::CreditCard));
/// assert!("bitcoin".parse::<PaymentMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentMethod {
    /// Credit card.
    CreditCard,
    /// Bank slip.
    Billet,
    /// PIX.
    Pix,
}

impl PaymentMethod {
    /// Every payment method, in display order.
    pub const ALL: [Self; 3] = [Self::CreditCard, Self::Billet, Self::Pix];

    /// Wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "creditCard",
            Self::Billet => "billet",
            Self::Pix => "pix",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creditCard" | "credit_card" | "credit-card" => Ok(Self::CreditCard),
            "billet" => Ok(Self::Billet),
            "pix" => Ok(Self::Pix),
            _ => Err(format!("unknown payment method: {s}")),
        }
    }
}

/// A frequently asked question.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FaqEntry {
    /// Question shown in the list.
    pub title: String,

    /// Answer body.
    pub content: String,
}

/// Deserializers for maps keyed by vehicle type that reject a key listed
/// twice instead of keeping the last entry.
pub(crate) mod unique_keys {
    use std::collections::BTreeMap;
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

    use super::{ParkingTier, PurchaseProduct, VehicleType};

    /// Marker of the error raised for a repeated key. The offending field
    /// path follows it between backticks.
    pub(crate) const DUPLICATE_KEY: &str = "vehicle type listed more than once at ";

    struct UniqueKeys<T> {
        field: &'static str,
        marker: PhantomData<T>,
    }

    impl<'de, T: Deserialize<'de>> Visitor<'de> for UniqueKeys<T> {
        type Value = BTreeMap<VehicleType, T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a map keyed by vehicle type")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = BTreeMap::new();
            while let Some(key) = map.next_key::<VehicleType>()? {
                let value = map.next_value()?;
                if entries.insert(key, value).is_some() {
                    return Err(de::Error::custom(format!(
                        "{DUPLICATE_KEY}`{}.{key}`",
                        self.field
                    )));
                }
            }
            Ok(entries)
        }
    }

    fn deserialize<'de, D, T>(
        deserializer: D,
        field: &'static str,
    ) -> Result<BTreeMap<VehicleType, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        deserializer.deserialize_map(UniqueKeys {
            field,
            marker: PhantomData,
        })
    }

    pub(super) fn parking_rules<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<VehicleType, Vec<ParkingTier>>, D::Error> {
        deserialize(deserializer, "parkingRules")
    }

    pub(super) fn min_credits_by_vehicle<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<VehicleType, u32>, D::Error> {
        deserialize(deserializer, "purchase.minCreditsByVehicle")
    }

    pub(super) fn purchase_products<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<VehicleType, Vec<PurchaseProduct>>, D::Error> {
        deserialize(deserializer, "purchase.products")
    }

    /// Extract the field path from a repeated-key error message.
    pub(crate) fn duplicate_field(message: &str) -> Option<&str> {
        let start = message.find(DUPLICATE_KEY)? + DUPLICATE_KEY.len();
        let rest = message[start..].strip_prefix('`')?;
        rest.find('`').map(|end| &rest[..end])
    }
}
