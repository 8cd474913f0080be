/// Record validation: decides which area records are scoreable.
///
/// A record passes only when all four required scoring attributes are
/// present and finite-numeric. Rejection is a normal, expected outcome —
/// it is counted and reported, never raised. The typed `Rejection` variants
/// keep validation failures distinguishable from provider failures in the
/// run summary.
///
/// This module also owns breakdown extraction: the provider's histogram
/// buckets arrive in a fixed, known order, and extraction maps bucket
/// position *i* to the *i*-th label of the service's own label table,
/// returning a fresh map. The provider's own labels are advisory only.

use std::collections::HashMap;
use std::fmt;

use crate::model::{
    AreaRecord, BreakdownEntry, ValidatedArea, FIELD_DENSITY, FIELD_HOME_VALUE,
    FIELD_HOUSING_UNITS, FIELD_INCOME,
};

// ---------------------------------------------------------------------------
// Breakdown label tables
// ---------------------------------------------------------------------------

/// Decade the housing structure was built, earliest first.
pub const HOUSE_AGE_LABELS: [&str; 9] = [
    "1930", "1940", "1950", "1960", "1970", "1980", "1990", "2000", "2010",
];

/// Highest educational degree attained, lowest first.
pub const DEGREE_LABELS: [&str; 7] = [
    "NO_HS",
    "HS",
    "Associates",
    "Bachelors",
    "Masters",
    "Professional",
    "Doctorate",
];

/// Source of household earnings.
pub const EARNINGS_LABELS: [&str; 3] = ["None", "Part_Time", "Full_Time"];

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// Why a record was excluded from the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The provider found no area for the coordinate.
    NoArea,
    /// A required scoring attribute is absent from the record.
    MissingField(&'static str),
    /// A required scoring attribute is present but not a finite number.
    NonNumericField(&'static str),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoArea => write!(f, "no area matched the coordinate"),
            Rejection::MissingField(name) => write!(f, "required field '{}' is missing", name),
            Rejection::NonNumericField(name) => {
                write!(f, "required field '{}' is not a finite number", name)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn required_field(record: &AreaRecord, name: &'static str) -> Result<f64, Rejection> {
    match record.attributes.get(name) {
        None => Err(Rejection::MissingField(name)),
        Some(value) => value
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or(Rejection::NonNumericField(name)),
    }
}

/// Validates an optional area record into a scoreable row.
///
/// `None` input (a provider miss) is `Rejection::NoArea`. Breakdown
/// extraction failures do not reject the row — the histograms are
/// enrichment, not scoring inputs.
pub fn validate_record(record: Option<AreaRecord>) -> Result<ValidatedArea, Rejection> {
    let record = record.ok_or(Rejection::NoArea)?;

    let median_household_income = required_field(&record, FIELD_INCOME)?;
    let median_home_value = required_field(&record, FIELD_HOME_VALUE)?;
    let population_density = required_field(&record, FIELD_DENSITY)?;
    let housing_units = required_field(&record, FIELD_HOUSING_UNITS)?;

    let house_age = extract_breakdown(&record.house_age, &HOUSE_AGE_LABELS);
    let degrees = extract_breakdown(&record.degrees, &DEGREE_LABELS);
    let earnings = extract_breakdown(&record.earnings, &EARNINGS_LABELS);

    Ok(ValidatedArea {
        median_household_income,
        median_home_value,
        population_density,
        housing_units,
        house_age,
        degrees,
        earnings,
        source: record,
    })
}

// ---------------------------------------------------------------------------
// Breakdown extraction
// ---------------------------------------------------------------------------

/// Maps an ordered sequence of raw histogram buckets onto a predeclared
/// label table by position, returning a new label → value map.
///
/// Returns `None` when the raw sequence is shorter than the label table —
/// a positional mapping against a truncated histogram would silently
/// misattribute buckets. Surplus trailing buckets are ignored.
pub fn extract_breakdown(
    raw: &[BreakdownEntry],
    labels: &[&str],
) -> Option<HashMap<String, f64>> {
    if raw.len() < labels.len() {
        return None;
    }

    Some(
        labels
            .iter()
            .zip(raw.iter())
            .map(|(label, entry)| (label.to_string(), entry.value))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
