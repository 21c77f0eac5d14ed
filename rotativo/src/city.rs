//! Validated city configuration and its pricing queries.
//!
//! A [`CityConfig`] can only be obtained from a [`CityDocument`] that passed
//! validation, so every query here may rely on the document invariants:
//! declared vehicle types, strictly increasing tier durations, ascending
//! purchase bundles and at least one payment method when purchase is on.

use serde::Serialize;

use crate::config::schema::{
    BalanceDisplay, CityDocument, FaqEntry, ParkingTier, PaymentMethod, PurchaseConfig,
    PurchaseProduct, VehicleType,
};
use crate::config::CityConfigValidator;
use crate::error::{LookupError, Result};
use crate::price::Price;
use crate::tenant::TenantId;

type LookupResult<T> = std::result::Result<T, LookupError>;

/// The validated configuration of one city.
///
/// Immutable once constructed; share it freely between readers.
///
/// # Examples
///
/// ```
/// use rotativo::config::{BundledSource, DocumentFormat, VehicleType};
/// use rotativo::{CityConfigRegistry, Price, TenantId};
///
/// let document = r#"{
///     "city": "Demo", "domain": "demo.example.com",
///     "latitude": -19.9, "longitude": -43.9,
///     "downloadLink": "https://example.com", "termsLink": "https://example.com/terms",
///     "androidPackage": "com.example.demo", "iosPackage": "com.example.demo",
///     "vehicleTypes": [1], "mainLogo": "logo.png", "logoMenu": "menu.png",
///     "balance": { "showBy": "real", "showDetails": false },
///     "parkingRules": { "1": [
///         { "time": 30, "price": 2, "credits": 1 },
///         { "time": 60, "price": 3, "credits": 2 }
///     ] },
///     "purchase": { "showBy": "real", "chargeback": false,
///                   "payment": { "creditCard": true, "billet": false } }
/// }"#;
///
/// let source = BundledSource::new()
///     .with_document("demo", DocumentFormat::Json, document)
///     .unwrap();
/// let registry = CityConfigRegistry::new(source);
/// let config = registry.load(&TenantId::new("demo").unwrap()).unwrap();
///
/// let price = config.price_for_duration(VehicleType::new(1), 45).unwrap();
/// assert_eq!(price, Price::from_centavos(300));
/// assert!(config.is_payment_method_enabled("creditCard"));
/// assert!(!config.is_payment_method_enabled("bitcoin"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityConfig {
    tenant: TenantId,
    #[serde(flatten)]
    document: CityDocument,
}

impl CityConfig {
    /// Validate `document` and wrap it as the configuration of `tenant`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) with the first
    /// invariant violation found.
    pub fn from_document(tenant: TenantId, document: CityDocument) -> Result<Self> {
        CityConfigValidator::validate(&document)?;
        Ok(Self { tenant, document })
    }

    /// Returns the tenant this configuration belongs to.
    #[must_use]
    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    /// Returns the underlying document.
    #[must_use]
    pub fn document(&self) -> &CityDocument {
        &self.document
    }

    /// Returns the display name of the city.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.document.city
    }

    /// Returns the map centering point as `(latitude, longitude)`.
    #[must_use]
    pub fn coordinates(&self) -> (f64, f64) {
        (self.document.latitude, self.document.longitude)
    }

    /// Returns the WhatsApp support number, if any.
    #[must_use]
    pub fn whatsapp(&self) -> Option<&str> {
        self.document.whatsapp.as_deref()
    }

    /// Returns the chatbot URL, if any.
    #[must_use]
    pub fn chat_bot_url(&self) -> Option<&str> {
        self.document.chat_bot_url.as_deref()
    }

    /// Returns the balance screen settings.
    #[must_use]
    pub fn balance(&self) -> BalanceDisplay {
        self.document.balance
    }

    /// Returns the declared vehicle types.
    #[must_use]
    pub fn vehicle_types(&self) -> &[VehicleType] {
        &self.document.vehicle_types
    }

    /// Returns the purchase settings.
    #[must_use]
    pub fn purchase(&self) -> &PurchaseConfig {
        &self.document.purchase
    }

    /// Returns the FAQ entries in display order.
    #[must_use]
    pub fn faq(&self) -> &[FaqEntry] {
        &self.document.faq
    }

    /// Returns the vehicle type preselected in purchase and parking flows:
    /// the configured default, else the first declared vehicle type.
    #[must_use]
    pub fn default_vehicle_type(&self) -> VehicleType {
        // validation guarantees at least one declared vehicle type
        self.document
            .purchase
            .vehicle_type_default
            .unwrap_or(self.document.vehicle_types[0])
    }

    /// Returns the price ladder of a vehicle type.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownVehicleType`] if the vehicle type has no
    /// parking rules.
    pub fn tiers(&self, vehicle_type: VehicleType) -> LookupResult<&[ParkingTier]> {
        self.document
            .parking_rules
            .get(&vehicle_type)
            .map(Vec::as_slice)
            .ok_or(LookupError::UnknownVehicleType { vehicle_type })
    }

    /// Returns the longest session configured for a vehicle type, in minutes.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownVehicleType`] if the vehicle type has no
    /// parking rules.
    pub fn maximum_duration(&self, vehicle_type: VehicleType) -> LookupResult<u32> {
        let tiers = self.tiers(vehicle_type)?;
        Ok(tiers.last().map_or(0, |tier| tier.minutes))
    }

    /// Select the tier charged for a session of `minutes`: the shortest tier
    /// lasting at least that long.
    ///
    /// # Errors
    ///
    /// - [`LookupError::InvalidDuration`] if `minutes` is zero.
    /// - [`LookupError::UnknownVehicleType`] if the vehicle type has no rules.
    /// - [`LookupError::DurationExceedsMaximum`] if `minutes` is longer than
    ///   the longest tier. Sessions are never extrapolated past the ladder.
    pub fn tier_for_duration(
        &self,
        vehicle_type: VehicleType,
        minutes: u32,
    ) -> LookupResult<&ParkingTier> {
        if minutes == 0 {
            return Err(LookupError::InvalidDuration { requested: minutes });
        }

        let tiers = self.tiers(vehicle_type)?;
        let index = tiers.partition_point(|tier| tier.minutes < minutes);
        tiers
            .get(index)
            .ok_or_else(|| LookupError::DurationExceedsMaximum {
                vehicle_type,
                requested: minutes,
                maximum: tiers.last().map_or(0, |tier| tier.minutes),
            })
    }

    /// Price of a session of `minutes` for a vehicle type.
    ///
    /// # Errors
    ///
    /// See [`tier_for_duration`](Self::tier_for_duration).
    pub fn price_for_duration(
        &self,
        vehicle_type: VehicleType,
        minutes: u32,
    ) -> LookupResult<Price> {
        self.tier_for_duration(vehicle_type, minutes)
            .map(|tier| tier.price)
    }

    /// Purchasable credit bundles of a vehicle type, in display order
    /// (ascending credits).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownVehicleType`] if no bundles are
    /// configured for the vehicle type.
    pub fn purchase_options(
        &self,
        vehicle_type: VehicleType,
    ) -> LookupResult<&[PurchaseProduct]> {
        self.document
            .purchase
            .products
            .get(&vehicle_type)
            .map(Vec::as_slice)
            .ok_or(LookupError::UnknownVehicleType { vehicle_type })
    }

    /// Minimum number of credits purchasable for a vehicle type, if set.
    #[must_use]
    pub fn minimum_purchase_credits(&self, vehicle_type: VehicleType) -> Option<u32> {
        self.document
            .purchase
            .min_credits_by_vehicle
            .get(&vehicle_type)
            .copied()
    }

    /// Returns `true` if purchase flows are offered.
    #[must_use]
    pub fn purchase_enabled(&self) -> bool {
        self.document.purchase.enabled
    }

    /// Returns `true` if `method` can be used to buy credits.
    ///
    /// Always `false` when purchase flows are disabled.
    #[must_use]
    pub fn accepts(&self, method: PaymentMethod) -> bool {
        self.purchase_enabled() && self.document.purchase.payment.is_enabled(method)
    }

    /// Returns `true` if the payment method named `name` is enabled.
    ///
    /// Unknown names are reported as disabled rather than as errors, so
    /// callers may ask about methods this schema does not know yet.
    #[must_use]
    pub fn is_payment_method_enabled(&self, name: &str) -> bool {
        name.parse::<PaymentMethod>()
            .is_ok_and(|method| self.accepts(method))
    }

    /// Payment methods usable to buy credits, in display order.
    #[must_use]
    pub fn enabled_payment_methods(&self) -> Vec<PaymentMethod> {
        PaymentMethod::ALL
            .into_iter()
            .filter(|method| self.accepts(*method))
            .collect()
    }
}


#[cfg(test)]
#[allow(unused_doc_comments)] // proptest! macro doesn't support doc comments
mod property_tests {
    use super::*;
    use crate::config::validator::tests::sample_document;
    use proptest::prelude::*;

    const CAR: VehicleType = VehicleType::new(1);

    fn config_with_ladder(minutes: &[u32]) -> CityConfig {
        let mut doc = sample_document();
        let tiers = minutes
            .iter()
            .zip(1i64..)
            .map(|(m, i)| ParkingTier {
                minutes: *m,
                price: Price::from_centavos(i * 100),
                credits: u32::try_from(i).unwrap(),
            })
            .collect();
        doc.parking_rules.insert(CAR, tiers);
        CityConfig::from_document(TenantId::new("demo").unwrap(), doc).unwrap()
    }

    fn ladder_strategy() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::btree_set(1u32..=600, 1..10).prop_map(|set| set.into_iter().collect())
    }

    /// Property: the selected tier is the smallest one covering the request
    ///
    /// For every requested duration d within the ladder, the chosen tier t
    /// satisfies t >= d, and no shorter tier also satisfies it.
    proptest! {
        #[test]
        fn prop_selected_tier_is_minimal_cover(ladder in ladder_strategy(), requested in 1u32..=700) {
            let config = config_with_ladder(&ladder);
            let maximum = *ladder.last().unwrap();

            match config.tier_for_duration(CAR, requested) {
                Ok(tier) => {
                    prop_assert!(tier.minutes >= requested);
                    prop_assert!(ladder.iter().all(|m| *m < requested || *m >= tier.minutes));
                }
                Err(LookupError::DurationExceedsMaximum { maximum: reported, .. }) => {
                    prop_assert!(requested > maximum);
                    prop_assert_eq!(reported, maximum);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }

    /// Property: price is monotonic in the requested duration
    proptest! {
        #[test]
        fn prop_price_monotonic(ladder in ladder_strategy(), a in 1u32..=600, b in 1u32..=600) {
            let config = config_with_ladder(&ladder);
            let (short, long) = if a <= b { (a, b) } else { (b, a) };

            if let (Ok(p1), Ok(p2)) = (
                config.price_for_duration(CAR, short),
                config.price_for_duration(CAR, long),
            ) {
                prop_assert!(p1 <= p2);
            }
        }
    }

    /// Property: lookups are deterministic
    proptest! {
        #[test]
        fn prop_lookup_deterministic(ladder in ladder_strategy(), requested in 0u32..=700) {
            let config = config_with_ladder(&ladder);
            prop_assert_eq!(
                config.price_for_duration(CAR, requested),
                config.price_for_duration(CAR, requested)
            );
        }
    }
}
