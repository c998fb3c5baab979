//! Property record and market classification.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// == Property Image ==
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyImage {
    #[serde(default)]
    pub image_url: String,
}

// == Property ==
/// A single property listing.
///
/// Deserialization is permissive: every field defaults so legacy records with
/// gaps never fail to load. Fields not modeled here ride along in `extra` and
/// survive a full-file rewrite unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    #[serde(default)]
    pub development_name: String,
    #[serde(default)]
    pub reference_id: String,
    #[serde(default)]
    pub town: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub country: String,
    /// Subtype, e.g. "Apartment" or "Villa"
    #[serde(default, rename = "type")]
    pub subtype: String,
    /// Explicit market classification: "off-plan", "resale" or "rent"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    /// Legacy classification field, e.g. "new-building" or "secondary"
    #[serde(default)]
    pub property_type: String,
    /// Legacy classification field
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub price_to: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub built_area: f64,
    #[serde(default)]
    pub built_area_to: f64,
    #[serde(default)]
    pub beds: u32,
    #[serde(default)]
    pub baths: u32,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Completion timestamp in epoch milliseconds; 0 = unknown
    #[serde(default)]
    pub completion_date: i64,
    #[serde(default)]
    pub ready_project: bool,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Stable hash of the reference id, used only for the "random" sort order
    #[serde(default, rename = "randomScore")]
    pub random_score: u64,
    /// Set by the geocoding post-processor when coordinates were resolved
    /// from the location table rather than present on the record
    #[serde(default, rename = "_isGeocoded")]
    pub is_geocoded: bool,
    /// Unmodeled legacy fields, preserved across rewrites
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Property {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// True when the record carries a real coordinate pair.
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }

    /// First image URL, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(|i| i.image_url.as_str())
    }

    // == Classification ==
    /// Classifies the record into a market using the field precedence
    /// `market` > `property_type` > `status` > allow-list membership.
    ///
    /// The allow-list of known new-build reference ids only decides records
    /// whose explicit fields are all silent. Classification is total in the
    /// sense that a record maps to at most one market.
    pub fn classify(&self, new_build_refs: &HashSet<String>) -> Option<Market> {
        if let Some(market) = self.market.as_deref().and_then(Market::from_value) {
            return Some(market);
        }
        if let Some(market) = Market::from_legacy(&self.property_type) {
            return Some(market);
        }
        if let Some(market) = Market::from_legacy(&self.status) {
            return Some(market);
        }
        if !self.reference_id.is_empty() && new_build_refs.contains(&self.reference_id) {
            return Some(Market::OffPlan);
        }
        None
    }

    // == Random Score ==
    /// Fills in the stable pseudo-random ordering score when missing.
    ///
    /// The score is an FNV-1a hash of the reference id (or the numeric id for
    /// records without one), so the "random" sort order never reshuffles
    /// between requests or restarts.
    pub fn ensure_random_score(&mut self) {
        if self.random_score != 0 {
            return;
        }
        self.random_score = if self.reference_id.is_empty() {
            fnv1a(self.id.to_string().as_bytes())
        } else {
            fnv1a(self.reference_id.as_bytes())
        };
    }
}

// == Market ==
/// Top-level market classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Market {
    OffPlan,
    Resale,
    Rent,
}

impl Market {
    /// Parses an explicit `market` field value.
    pub fn from_value(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "off-plan" => Some(Market::OffPlan),
            "resale" => Some(Market::Resale),
            "rent" => Some(Market::Rent),
            _ => None,
        }
    }

    /// Parses a legacy `property_type`/`status` value.
    pub fn from_legacy(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "new-building" | "new building" | "off-plan" | "off plan" => Some(Market::OffPlan),
            "secondary" => Some(Market::Resale),
            "rent" => Some(Market::Rent),
            _ => None,
        }
    }

    /// Parses a market tab query value, accepting the public-site aliases
    /// ("New Building" for off-plan, "Secondary" for resale).
    pub fn from_tab(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "off-plan" | "off plan" | "new building" | "new-building" => Some(Market::OffPlan),
            "secondary" | "resale" => Some(Market::Resale),
            "rent" => Some(Market::Rent),
            _ => None,
        }
    }
}

// == Utility Functions ==
/// 64-bit FNV-1a. Stable across platforms and runs, unlike the std hasher.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
