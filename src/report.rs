/// Ranked report output: ordering and CSV serialization.
///
/// Thin boundary over the scored dataset. Ranking is a stable descending
/// sort on the normalized score; rows that could not be scored sort after
/// every scored row, and ties keep discovery order. The stage counts are
/// part of every run's output so data loss at each stage stays observable.

use std::cmp::Ordering;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::analysis::severity::{NormalizedScore, ScoredDataset};

/// Report column set, in output order.
const REPORT_HEADER: [&str; 6] = [
    "source_area",
    "median_household_income",
    "median_home_value",
    "population_density",
    "number_housing_units",
    "normalized_severity_score",
];

/// How `NormalizedScore::Undefined` renders in the CSV. Exists only at this
/// serialization boundary; nothing upstream traffics in the string.
const UNDEFINED_CELL: &str = "NA";

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// A scored dataset plus its ranked row order. `order[0]` is the index of
/// the most severe row.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedReport {
    pub scored: ScoredDataset,
    pub order: Vec<usize>,
}

fn rank_cmp(a: &NormalizedScore, b: &NormalizedScore) -> Ordering {
    match (a, b) {
        // Descending by score.
        (NormalizedScore::Value(x), NormalizedScore::Value(y)) => {
            y.partial_cmp(x).unwrap_or(Ordering::Equal)
        }
        (NormalizedScore::Value(_), NormalizedScore::Undefined) => Ordering::Less,
        (NormalizedScore::Undefined, NormalizedScore::Value(_)) => Ordering::Greater,
        (NormalizedScore::Undefined, NormalizedScore::Undefined) => Ordering::Equal,
    }
}

/// Ranks a scored dataset. The sort is stable, so equal scores (and all
/// undefined rows) keep their relative discovery order.
pub fn rank(scored: ScoredDataset) -> RankedReport {
    let mut order: Vec<usize> = (0..scored.normalized.len()).collect();
    order.sort_by(|&a, &b| rank_cmp(&scored.normalized[a], &scored.normalized[b]));

    RankedReport { scored, order }
}

// ---------------------------------------------------------------------------
// CSV serialization
// ---------------------------------------------------------------------------

impl RankedReport {
    /// Writes the ranked table as CSV.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(REPORT_HEADER)?;

        let dataset = &self.scored.dataset;
        for &i in &self.order {
            let score_cell = match self.scored.normalized[i] {
                NormalizedScore::Value(v) => v.to_string(),
                NormalizedScore::Undefined => UNDEFINED_CELL.to_string(),
            };

            csv_writer.write_record([
                dataset.sources[i].zipcode.clone(),
                dataset.median_household_income[i].to_string(),
                dataset.median_home_value[i].to_string(),
                dataset.population_density[i].to_string(),
                dataset.housing_units[i].to_string(),
                score_cell,
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the ranked table to a file.
    pub fn write_csv_file(&self, path: &Path) -> csv::Result<()> {
        let file = File::create(path).map_err(csv::Error::from)?;
        self.write_csv(file)
    }
}

/// Writes a header-only CSV: the report shape for a run whose population
/// could not be normalized.
pub fn write_empty_csv<W: io::Write>(writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(REPORT_HEADER)?;
    csv_writer.flush()?;
    Ok(())
}

/// Header-only CSV to a file.
pub fn write_empty_csv_file(path: &Path) -> csv::Result<()> {
    let file = File::create(path).map_err(csv::Error::from)?;
    write_empty_csv(file)
}

// ---------------------------------------------------------------------------
// Stage counts
// ---------------------------------------------------------------------------

/// Row counts at each pipeline stage, reported alongside every ranked table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    /// Detections in the raw feed.
    pub raw: usize,
    /// Detections above the confidence threshold.
    pub filtered: usize,
    /// Lookups with no matching area (including timeouts).
    pub lookup_misses: usize,
    /// Lookups that failed outright (HTTP, parse, transport).
    pub provider_errors: usize,
    /// Records rejected for missing or non-numeric required fields.
    pub incomplete: usize,
    /// Rows that reached the dataset.
    pub validated: usize,
    /// Rows whose score is undefined (rank last).
    pub unscoreable: usize,
    /// Rows in the final ranked table.
    pub ranked: usize,
}

impl StageCounts {
    /// Multi-line console rendering, one stage per line.
    pub fn render(&self) -> String {
        [
            format!("Raw detections:      {}", self.raw),
            format!("Above threshold:     {}", self.filtered),
            format!("Lookup misses:       {}", self.lookup_misses),
            format!("Provider errors:     {}", self.provider_errors),
            format!("Incomplete records:  {}", self.incomplete),
            format!("Validated rows:      {}", self.validated),
            format!("Unscoreable rows:    {}", self.unscoreable),
            format!("Ranked rows:         {}", self.ranked),
        ]
        .join("\n   ")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
