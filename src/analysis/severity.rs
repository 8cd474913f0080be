/// Severity scoring: weighted combination of area attributes, then
/// population-level z-score normalization.
///
/// Two phases:
/// 1. Raw score — a linear combination of the four required attributes with
///    the weights below. A placeholder model, kept until a fitted one
///    replaces it; the weights live here as named constants so tuning never
///    touches the scoring logic.
/// 2. Normalization — rescale raw scores by the population mean and
///    Bessel-corrected sample standard deviation, producing unit-free,
///    comparable values (mean ≈ 0, stdev ≈ 1 across the run).
///
/// A row whose raw score is non-finite gets `NormalizedScore::Undefined` and
/// ranks last; it never poisons the population statistics. A population with
/// fewer than two finite raw scores cannot be normalized at all, which is an
/// explicit `NormalizationUndefined` result rather than a division by zero.

use std::fmt;

use crate::dataset::Dataset;

// ---------------------------------------------------------------------------
// Scoring weights
// ---------------------------------------------------------------------------

pub const W_INCOME: f64 = 0.10;
pub const W_HOME_VALUE: f64 = 0.20;
pub const W_DENSITY: f64 = 0.50;
pub const W_HOUSING_UNITS: f64 = 0.20;

// ---------------------------------------------------------------------------
// Score types
// ---------------------------------------------------------------------------

/// A normalized severity score. `Value` is always finite; `Undefined` is the
/// single "could not score this row" representation in the system and sorts
/// after every `Value` in the ranked report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizedScore {
    Value(f64),
    Undefined,
}

impl NormalizedScore {
    pub fn is_undefined(&self) -> bool {
        matches!(self, NormalizedScore::Undefined)
    }

    /// The finite score, if this row has one.
    pub fn value(&self) -> Option<f64> {
        match self {
            NormalizedScore::Value(v) => Some(*v),
            NormalizedScore::Undefined => None,
        }
    }
}

/// The population could not be normalized. Reported as a run outcome, not a
/// crash: the pipeline still emits counts and a header-only report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationUndefined {
    /// Fewer than two rows had a finite raw score, so the sample standard
    /// deviation does not exist.
    TooFewRows { usable_rows: usize },
    /// All finite raw scores are identical; z-scores are undefined.
    ZeroVariance { usable_rows: usize },
}

impl fmt::Display for NormalizationUndefined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationUndefined::TooFewRows { usable_rows } => write!(
                f,
                "cannot normalize: {} usable row(s), need at least 2",
                usable_rows
            ),
            NormalizationUndefined::ZeroVariance { usable_rows } => write!(
                f,
                "cannot normalize: all {} usable rows have identical raw scores",
                usable_rows
            ),
        }
    }
}

impl std::error::Error for NormalizationUndefined {}

/// A dataset with its normalized severity column. `normalized[i]` scores
/// row *i* of `dataset`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDataset {
    pub dataset: Dataset,
    pub normalized: Vec<NormalizedScore>,
}

// ---------------------------------------------------------------------------
// Phase 1: raw weighted score
// ---------------------------------------------------------------------------

/// Raw severity for one row.
pub fn raw_severity(income: f64, home_value: f64, density: f64, housing_units: f64) -> f64 {
    W_INCOME * income
        + W_HOME_VALUE * home_value
        + W_DENSITY * density
        + W_HOUSING_UNITS * housing_units
}

/// Raw severity per dataset row, in row order. Values may be non-finite when
/// the inputs overflow; normalization turns those into `Undefined`.
pub fn raw_scores(dataset: &Dataset) -> Vec<f64> {
    (0..dataset.len())
        .map(|i| {
            raw_severity(
                dataset.median_household_income[i],
                dataset.median_home_value[i],
                dataset.population_density[i],
                dataset.housing_units[i],
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Phase 2: population normalization
// ---------------------------------------------------------------------------

/// Z-score-normalizes raw scores against the finite population, in input
/// order. Single-pass over fixed statistics, so scoring the same input twice
/// yields identical output.
pub fn normalize(raw: &[f64]) -> Result<Vec<NormalizedScore>, NormalizationUndefined> {
    let usable: Vec<f64> = raw.iter().copied().filter(|v| v.is_finite()).collect();

    if usable.len() < 2 {
        return Err(NormalizationUndefined::TooFewRows {
            usable_rows: usable.len(),
        });
    }

    let mean = usable.iter().sum::<f64>() / usable.len() as f64;
    let variance = usable
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / (usable.len() - 1) as f64;
    let stdev = variance.sqrt();

    if stdev == 0.0 {
        return Err(NormalizationUndefined::ZeroVariance {
            usable_rows: usable.len(),
        });
    }

    Ok(raw
        .iter()
        .map(|v| {
            if v.is_finite() {
                NormalizedScore::Value((v - mean) / stdev)
            } else {
                NormalizedScore::Undefined
            }
        })
        .collect())
}

/// Scores a dataset: raw weighted scores, then normalization.
pub fn score_dataset(dataset: Dataset) -> Result<ScoredDataset, NormalizationUndefined> {
    let normalized = normalize(&raw_scores(&dataset))?;
    Ok(ScoredDataset {
        dataset,
        normalized,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
