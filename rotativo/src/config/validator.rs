//! City document validation.
//!
//! This module checks the cross-field invariants that the schema types
//! cannot express on their own: referential integrity of vehicle-type codes,
//! monotonic price ladders, purchase bundle ordering, and payment gating.
//! Validation stops at the first violation.

use std::collections::{BTreeMap, HashSet};

use crate::config::schema::{
    CityDocument, FaqEntry, ParkingTier, PurchaseConfig, PurchaseProduct, VehicleType,
};
use crate::error::ValidationError;

type Result<T> = std::result::Result<T, ValidationError>;

/// Validates city documents.
///
/// # Examples
///
/// ```no_run
/// use rotativo::config::{CityConfigValidator, CityDocument};
///
/// let text = std::fs::read_to_string("assets/config/cities/demo.json").unwrap();
/// let document: CityDocument = serde_json::from_str(&text).unwrap();
/// CityConfigValidator::validate(&document).unwrap();
/// ```
pub struct CityConfigValidator;

impl CityConfigValidator {
    /// Validate a complete city document.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(document: &CityDocument) -> Result<()> {
        Self::validate_text("city", &document.city)?;
        Self::validate_text("domain", &document.domain)?;
        Self::validate_text("androidPackage", &document.android_package)?;
        Self::validate_text("iosPackage", &document.ios_package)?;
        Self::validate_text("mainLogo", &document.main_logo)?;
        Self::validate_text("logoMenu", &document.logo_menu)?;
        Self::validate_link("downloadLink", &document.download_link)?;
        Self::validate_link("termsLink", &document.terms_link)?;

        if let Some(ref url) = document.chat_bot_url {
            Self::validate_link("chatBotURL", url)?;
        }

        if let Some(ref number) = document.whatsapp {
            Self::validate_phone("whatsapp", number)?;
        }

        Self::validate_coordinates(document.latitude, document.longitude)?;

        let declared = Self::validate_vehicle_types(&document.vehicle_types)?;
        Self::validate_parking_rules(&document.parking_rules, &declared)?;
        Self::validate_purchase(&document.purchase, &declared)?;
        Self::validate_faq(&document.faq)?;

        Ok(())
    }

    /// Validate that a required text field is not blank.
    fn validate_text(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(
                field,
                "Cannot be empty or only whitespace",
            ));
        }
        Ok(())
    }

    /// Validate that a link is an absolute http(s) URL.
    fn validate_link(field: &str, value: &str) -> Result<()> {
        Self::validate_text(field, value)?;

        let rest = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"));
        match rest {
            Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
            _ => Err(ValidationError::new(
                field,
                format!("Not an http(s) URL: {value}"),
            )),
        }
    }

    /// Validate a phone number: digits plus common phone punctuation, with
    /// at least ten digits (area code and subscriber number).
    fn validate_phone(field: &str, value: &str) -> Result<()> {
        if !value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
        {
            return Err(ValidationError::new(
                field,
                format!("Invalid phone number: {value}"),
            ));
        }

        let digits = value.chars().filter(char::is_ascii_digit).count();
        if digits < 10 {
            return Err(ValidationError::new(
                field,
                format!("Phone number must have at least 10 digits: {value}"),
            ));
        }

        Ok(())
    }

    /// Validate map centering coordinates.
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::new(
                "latitude",
                format!("Must be within [-90, 90]: {latitude}"),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::new(
                "longitude",
                format!("Must be within [-180, 180]: {longitude}"),
            ));
        }
        Ok(())
    }

    /// Validate the declared vehicle types and return them as a set.
    fn validate_vehicle_types(vehicle_types: &[VehicleType]) -> Result<HashSet<VehicleType>> {
        if vehicle_types.is_empty() {
            return Err(ValidationError::new(
                "vehicleTypes",
                "At least one vehicle type must be declared",
            ));
        }

        let mut declared = HashSet::with_capacity(vehicle_types.len());
        for (i, vehicle_type) in vehicle_types.iter().enumerate() {
            if !declared.insert(*vehicle_type) {
                return Err(ValidationError::new(
                    format!("vehicleTypes[{i}]"),
                    format!("Duplicate vehicle type: {vehicle_type}"),
                ));
            }
        }

        Ok(declared)
    }

    /// Validate that a referenced vehicle type is declared.
    fn validate_reference(
        field: &str,
        vehicle_type: VehicleType,
        declared: &HashSet<VehicleType>,
    ) -> Result<()> {
        if !declared.contains(&vehicle_type) {
            return Err(ValidationError::new(
                field,
                format!("Vehicle type {vehicle_type} is not declared in vehicleTypes"),
            ));
        }
        Ok(())
    }

    /// Validate parking price ladders.
    ///
    /// Each ladder must be non-empty, with strictly positive and strictly
    /// increasing durations and non-negative prices.
    fn validate_parking_rules(
        rules: &BTreeMap<VehicleType, Vec<ParkingTier>>,
        declared: &HashSet<VehicleType>,
    ) -> Result<()> {
        for (vehicle_type, tiers) in rules {
            let field = format!("parkingRules.{vehicle_type}");
            Self::validate_reference(&field, *vehicle_type, declared)?;

            if tiers.is_empty() {
                return Err(ValidationError::new(
                    field,
                    "At least one parking tier is required",
                ));
            }

            let mut previous: Option<u32> = None;
            for (i, tier) in tiers.iter().enumerate() {
                if tier.minutes == 0 {
                    return Err(ValidationError::new(
                        format!("{field}[{i}].time"),
                        "Duration must be > 0",
                    ));
                }

                if let Some(prev) = previous {
                    if tier.minutes <= prev {
                        return Err(ValidationError::new(
                            format!("{field}[{i}].time"),
                            format!(
                                "Durations must be strictly increasing ({} after {prev})",
                                tier.minutes
                            ),
                        ));
                    }
                }
                previous = Some(tier.minutes);

                if tier.price.is_negative() {
                    return Err(ValidationError::new(
                        format!("{field}[{i}].price"),
                        format!("Price cannot be negative: {}", tier.price),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Validate credit purchase settings.
    fn validate_purchase(purchase: &PurchaseConfig, declared: &HashSet<VehicleType>) -> Result<()> {
        if let Some(default) = purchase.vehicle_type_default {
            Self::validate_reference("purchase.vehicleTypeDefault", default, declared)?;
        }

        for vehicle_type in purchase.min_credits_by_vehicle.keys() {
            Self::validate_reference(
                &format!("purchase.minCreditsByVehicle.{vehicle_type}"),
                *vehicle_type,
                declared,
            )?;
        }

        for (vehicle_type, products) in &purchase.products {
            let field = format!("purchase.products.{vehicle_type}");
            Self::validate_reference(&field, *vehicle_type, declared)?;
            Self::validate_products(&field, products)?;
        }

        if purchase.enabled && !purchase.payment.any_enabled() {
            return Err(ValidationError::new(
                "purchase.payment",
                "At least one payment method must be enabled when purchase is enabled",
            ));
        }

        Ok(())
    }

    /// Validate purchase bundles: positive credits in strictly ascending
    /// order and non-negative prices.
    fn validate_products(field: &str, products: &[PurchaseProduct]) -> Result<()> {
        let mut previous: Option<u32> = None;
        for (i, product) in products.iter().enumerate() {
            if product.credits == 0 {
                return Err(ValidationError::new(
                    format!("{field}[{i}].credits"),
                    "Credits must be > 0",
                ));
            }

            if let Some(prev) = previous {
                if product.credits <= prev {
                    return Err(ValidationError::new(
                        format!("{field}[{i}].credits"),
                        format!(
                            "Bundles must be in ascending order of credits ({} after {prev})",
                            product.credits
                        ),
                    ));
                }
            }
            previous = Some(product.credits);

            if product.price.is_negative() {
                return Err(ValidationError::new(
                    format!("{field}[{i}].price"),
                    format!("Price cannot be negative: {}", product.price),
                ));
            }
        }
        Ok(())
    }

    /// Validate FAQ entries.
    fn validate_faq(faq: &[FaqEntry]) -> Result<()> {
        for (i, entry) in faq.iter().enumerate() {
            Self::validate_text(&format!("faq[{i}].title"), &entry.title)?;
        }
        Ok(())
    }
}
