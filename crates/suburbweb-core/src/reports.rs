//! Report structures produced by the transforms
//!
//! Numeric fields hold unrounded values. Rounding belongs to the view.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::Record;

/// Output of one transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Report {
    Properties(PropertiesReport),
    Schools(SchoolsReport),
    Amenities(AmenitiesReport),
    Demographics(DemographicsReport),
    Development(DevelopmentReport),
    Ethnicity(EthnicityReport),
    Pocket(PocketReport),
    /// Response body exactly as received
    Raw(Value),
}

impl Report {
    /// Number of primary rows, for logging
    pub fn row_count(&self) -> usize {
        match self {
            Report::Properties(r) => r.listings.len(),
            Report::Schools(r) => r.schools.len(),
            Report::Amenities(r) => r.amenities.len(),
            Report::Demographics(r) => r.age_summary.len() + r.income_summary.len() + r.pop_summary.len(),
            Report::Development(r) => r.developments.len(),
            Report::Ethnicity(r) => r.ethnicity_data.len(),
            Report::Pocket(r) => r.house_data.len() + r.unit_data.len(),
            Report::Raw(v) => v.as_array().map(Vec::len).unwrap_or(1),
        }
    }
}

/// Row count for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

// ==================== Properties ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyListing {
    /// "street, suburb, state" from whichever parts are present
    pub address: String,
    pub price: Option<f64>,
    pub property_type: Option<String>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub garage_spaces: Option<f64>,
    pub listing_date: Option<String>,
    /// Every field of the listing, flattened with "."
    pub fields: Record,
}

/// Mean price per property type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypePriceSummary {
    pub property_type: String,
    pub avg_price: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertiesReport {
    pub listings: Vec<PropertyListing>,
    /// Sorted by property type
    pub summary: Vec<TypePriceSummary>,
    pub avg_price: Option<f64>,
    pub median_bedrooms: Option<f64>,
    pub common_type: Option<String>,
}

// ==================== Schools ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRow {
    pub name: String,
    pub school_level_type: Value,
    pub school_sector_type: Value,
    pub gender: Value,
    pub attendance_rate: Value,
    pub naplan: Value,
    pub naplan_rank: Value,
    pub socioeconomic_rank: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolsReport {
    pub schools: Vec<SchoolRow>,
}

// ==================== Amenities ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmenityRow {
    pub name: String,
    pub category: Option<String>,
    pub fields: Record,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmenitiesReport {
    pub amenities: Vec<AmenityRow>,
    pub summary: Vec<CategoryCount>,
}

// ==================== Demographics ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeShare {
    pub age: String,
    pub proportion: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeShare {
    pub income_bracket: String,
    pub proportion: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationPoint {
    pub date: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicsReport {
    pub age_summary: Vec<AgeShare>,
    pub income_summary: Vec<IncomeShare>,
    /// Sorted by date
    pub pop_summary: Vec<PopulationPoint>,
}

// ==================== Development ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentReport {
    pub developments: Vec<Record>,
    pub summary: Vec<CategoryCount>,
}

// ==================== Ethnicity ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EthnicityShare {
    pub ethnicity: String,
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EthnicityReport {
    /// Mean across areas, largest first
    pub ethnicity_data: Vec<EthnicityShare>,
}

// ==================== Pocket prices ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketSummary {
    pub property_type: String,
    pub avg_price: Option<f64>,
    /// Mean of the non-null growth values
    pub avg_growth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketReport {
    pub house_data: Vec<Record>,
    pub unit_data: Vec<Record>,
    /// House row then Unit row
    pub price_summary: Vec<PocketSummary>,
}
