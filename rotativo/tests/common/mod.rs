//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the rotativo library.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

/// Path to the city documents bundled with the app.
#[allow(dead_code)]
pub fn bundled_cities_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("assets")
        .join("config")
        .join("cities")
}

/// Writes `content` to `dir/filename` and returns the path.
#[allow(dead_code)]
pub fn write_document(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// Builder for city documents with sensible defaults.
///
/// The default document declares a car (1) with the ladder
/// `[(30, 2.00), (60, 3.00), (120, 5.00)]`, one bundle of 2 credits and
/// credit card plus pix payment.
///
/// # Examples
///
/// ```no_run
/// # use common::CityFixture;
/// let json = CityFixture::new("Mariana")
///     .with_packages("com.rotativodigitalmariana", "com.rotativodigital.mariana")
///     .to_json();
/// ```
#[allow(dead_code)]
pub struct CityFixture {
    document: Value,
}

#[allow(dead_code)]
impl CityFixture {
    /// Creates a fixture for `city`.
    pub fn new(city: &str) -> Self {
        let slug: String = city
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase();

        Self {
            document: json!({
                "city": city,
                "domain": format!("{slug}.rotativodigital.com.br"),
                "latitude": -20.39,
                "longitude": -43.5,
                "downloadLink": "https://rotativodigital.com.br/app",
                "termsLink": "https://rotativodigital.com.br/termos",
                "androidPackage": format!("com.rotativodigital{slug}"),
                "iosPackage": format!("com.rotativodigital.{slug}"),
                "vehicleTypes": [1],
                "mainLogo": "logo.png",
                "logoMenu": "logo_menu.png",
                "balance": { "showBy": "real", "showDetails": true },
                "parkingRules": {
                    "1": [
                        { "time": 30, "price": 2.0, "credits": 1 },
                        { "time": 60, "price": 3.0, "credits": 2 },
                        { "time": 120, "price": 5.0, "credits": 4 }
                    ]
                },
                "purchase": {
                    "vehicleTypeDefault": 1,
                    "showBy": "real",
                    "chargeback": false,
                    "minCreditsByVehicle": { "1": 2 },
                    "products": { "1": [ { "credits": 2, "price": 3.0 } ] },
                    "payment": { "creditCard": true, "billet": false, "pix": true }
                },
                "faq": []
            }),
        }
    }

    /// Overrides both application identifiers.
    pub fn with_packages(mut self, android: &str, ios: &str) -> Self {
        self.document["androidPackage"] = json!(android);
        self.document["iosPackage"] = json!(ios);
        self
    }

    /// Replaces the ladder of vehicle type `code`, as `(minutes, reais)`.
    pub fn with_tiers(mut self, code: u32, tiers: &[(u32, f64)]) -> Self {
        let tiers: Vec<Value> = tiers
            .iter()
            .enumerate()
            .map(|(i, (time, price))| json!({ "time": time, "price": price, "credits": i + 1 }))
            .collect();
        self.document["parkingRules"][code.to_string()] = Value::Array(tiers);
        self
    }

    /// Replaces the payment flags.
    pub fn with_payment(mut self, credit_card: bool, billet: bool, pix: bool) -> Self {
        self.document["purchase"]["payment"] =
            json!({ "creditCard": credit_card, "billet": billet, "pix": pix });
        self
    }

    /// Sets the field at a JSON pointer to `value`, creating it in its
    /// parent object if missing.
    pub fn with(mut self, pointer: &str, value: Value) -> Self {
        let (parent, key) = pointer.rsplit_once('/').unwrap();
        let parent = self.document.pointer_mut(parent).unwrap();
        parent
            .as_object_mut()
            .unwrap()
            .insert(key.to_string(), value);
        self
    }

    /// Renders the document as pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.document).unwrap()
    }

    /// Writes the document to `dir/<tenant>.json`.
    pub fn write(&self, dir: &Path, tenant: &str) -> PathBuf {
        write_document(dir, &format!("{tenant}.json"), &self.to_json())
    }
}
