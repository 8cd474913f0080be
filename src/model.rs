/// Core data types for the wildfire severity service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no business logic — only types, the canonical
/// attribute-name constants, and the boundary error enums.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Required scoring attributes
// ---------------------------------------------------------------------------

/// Attribute key for median household income (USD).
pub const FIELD_INCOME: &str = "median_household_income";

/// Attribute key for median home value (USD).
pub const FIELD_HOME_VALUE: &str = "median_home_value";

/// Attribute key for population density (people per square mile).
pub const FIELD_DENSITY: &str = "population_density";

/// Attribute key for the total number of housing units.
pub const FIELD_HOUSING_UNITS: &str = "housing_units";

/// The four attributes a record must carry, as finite numbers, to be
/// scoreable. All other attributes are optional enrichment.
pub const REQUIRED_FIELDS: [&str; 4] = [
    FIELD_INCOME,
    FIELD_HOME_VALUE,
    FIELD_DENSITY,
    FIELD_HOUSING_UNITS,
];

// ---------------------------------------------------------------------------
// Detection types
// ---------------------------------------------------------------------------

/// A single wildfire hotspot observation from the detection feed.
///
/// Corresponds to one row of the FIRMS area CSV. Confidence is the
/// instrument's detection confidence on a 0–100 scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub latitude: f64,
    pub longitude: f64,
    pub confidence: f64,
}

// ---------------------------------------------------------------------------
// Area attribute types
// ---------------------------------------------------------------------------

/// One bucket of a categorical histogram as the area API serializes it.
///
/// The provider's labels are advisory; extraction maps buckets to the
/// service's own label tables by position (see `validate::extract_breakdown`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub value: f64,
}

/// Socio-economic attributes for the area surrounding one detection.
///
/// Produced at most once per detection by the area provider. The `attributes`
/// bag holds the scalar fields as raw JSON values — numeric when the provider
/// is well-behaved, but the validator is the component that enforces that,
/// so nothing here assumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRecord {
    /// ZCTA code identifying the area; used as the report's source reference.
    pub zipcode: String,
    pub major_city: Option<String>,
    /// Scalar attributes keyed by name (see the `FIELD_*` constants).
    pub attributes: HashMap<String, Value>,
    /// Housing-unit counts by decade the structure was built.
    pub house_age: Vec<BreakdownEntry>,
    /// Population counts by highest educational degree.
    pub degrees: Vec<BreakdownEntry>,
    /// Household counts by source of earnings.
    pub earnings: Vec<BreakdownEntry>,
}

impl AreaRecord {
    /// Returns the named attribute as a finite f64, or `None` when it is
    /// absent, non-numeric, or non-finite.
    pub fn numeric_attribute(&self, name: &str) -> Option<f64> {
        self.attributes
            .get(name)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }
}

/// An area record confirmed to carry all four required scoring fields as
/// finite numbers. Invariant: every numeric field below is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedArea {
    pub median_household_income: f64,
    pub median_home_value: f64,
    pub population_density: f64,
    pub housing_units: f64,
    /// Extracted house-age histogram, when the raw sequence covered the full
    /// label table. `None` means extraction failed, not that the row is bad.
    pub house_age: Option<HashMap<String, f64>>,
    pub degrees: Option<HashMap<String, f64>>,
    pub earnings: Option<HashMap<String, f64>>,
    /// The record this row was validated from.
    pub source: AreaRecord,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors from the detection feed. All of these are fatal to the run — the
/// pipeline never starts lookups on a partial feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    /// Non-2xx HTTP response from the FIRMS API.
    Unavailable(u16),
    /// Transport-level failure reaching the feed.
    Network(String),
    /// The response body was not a parseable detection CSV.
    Parse(String),
    /// FIRMS_MAP_KEY is not set in the environment.
    MissingKey,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Unavailable(code) => write!(f, "detection feed returned HTTP {}", code),
            FeedError::Network(msg) => write!(f, "detection feed unreachable: {}", msg),
            FeedError::Parse(msg) => write!(f, "detection feed parse error: {}", msg),
            FeedError::MissingKey => write!(f, "FIRMS_MAP_KEY is not set"),
        }
    }
}

impl std::error::Error for FeedError {}

/// Errors from a single area lookup. None of these are fatal — the pipeline
/// drops the affected detection and counts the loss.
#[derive(Debug, Clone, PartialEq)]
pub enum AreaError {
    /// Non-2xx HTTP response from the area API.
    Http(u16),
    /// The response body could not be deserialized.
    Parse(String),
    /// Transport-level failure reaching the area API.
    Network(String),
    /// The lookup exceeded the configured deadline. Degraded to a miss.
    Timeout,
}

impl fmt::Display for AreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaError::Http(code) => write!(f, "area API returned HTTP {}", code),
            AreaError::Parse(msg) => write!(f, "area API parse error: {}", msg),
            AreaError::Network(msg) => write!(f, "area API unreachable: {}", msg),
            AreaError::Timeout => write!(f, "area lookup timed out"),
        }
    }
}

impl std::error::Error for AreaError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with(value: Value) -> AreaRecord {
        let mut attributes = HashMap::new();
        attributes.insert(FIELD_INCOME.to_string(), value);
        AreaRecord {
            zipcode: "61602".to_string(),
            major_city: None,
            attributes,
            house_age: Vec::new(),
            degrees: Vec::new(),
            earnings: Vec::new(),
        }
    }

    #[test]
    fn test_numeric_attribute_reads_numbers() {
        let record = record_with(json!(41_226.0));
        assert_eq!(record.numeric_attribute(FIELD_INCOME), Some(41_226.0));
    }

    #[test]
    fn test_numeric_attribute_rejects_strings() {
        let record = record_with(json!("41226"));
        assert_eq!(record.numeric_attribute(FIELD_INCOME), None);
    }

    #[test]
    fn test_numeric_attribute_rejects_null_and_missing() {
        let record = record_with(Value::Null);
        assert_eq!(record.numeric_attribute(FIELD_INCOME), None);
        assert_eq!(record.numeric_attribute(FIELD_HOME_VALUE), None);
    }

    #[test]
    fn test_required_fields_are_distinct() {
        for (i, a) in REQUIRED_FIELDS.iter().enumerate() {
            for b in REQUIRED_FIELDS.iter().skip(i + 1) {
                assert_ne!(a, b, "required field list must not repeat names");
            }
        }
    }
}
