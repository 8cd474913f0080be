/// Integration tests: feed CSV → filter → concurrent enrichment →
/// validation → scoring → ranked CSV, over a canned area provider.
///
/// These exercise the cross-stage contracts the unit tests can't: counts
/// across a whole run, filter-order preservation under out-of-order lookup
/// completion, and the shape of the final CSV.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::json;

use firesev_service::config::ServiceConfig;
use firesev_service::ingest::areas::AreaProvider;
use firesev_service::ingest::firms::parse_detections;
use firesev_service::model::{
    AreaError, AreaRecord, FIELD_DENSITY, FIELD_HOME_VALUE, FIELD_HOUSING_UNITS, FIELD_INCOME,
};
use firesev_service::pipeline::{process_detections, ScoreOutcome};

// ---------------------------------------------------------------------------
// Canned provider
// ---------------------------------------------------------------------------

fn area_record(zipcode: &str, income: f64, home_value: f64, density: f64, units: f64) -> AreaRecord {
    let mut attributes = HashMap::new();
    attributes.insert(FIELD_INCOME.to_string(), json!(income));
    attributes.insert(FIELD_HOME_VALUE.to_string(), json!(home_value));
    attributes.insert(FIELD_DENSITY.to_string(), json!(density));
    attributes.insert(FIELD_HOUSING_UNITS.to_string(), json!(units));
    AreaRecord {
        zipcode: zipcode.to_string(),
        major_city: None,
        attributes,
        house_age: Vec::new(),
        degrees: Vec::new(),
        earnings: Vec::new(),
    }
}

/// Provider keyed by latitude (4 decimal places), with an optional artificial
/// delay per lookup so completion order can be forced to differ from
/// dispatch order.
struct CannedProvider {
    responses: HashMap<String, Result<Option<AreaRecord>, AreaError>>,
    delays_ms: HashMap<String, u64>,
}

impl CannedProvider {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            delays_ms: HashMap::new(),
        }
    }

    fn with(mut self, latitude: f64, response: Result<Option<AreaRecord>, AreaError>) -> Self {
        self.responses.insert(format!("{:.4}", latitude), response);
        self
    }

    fn with_delay(mut self, latitude: f64, delay_ms: u64) -> Self {
        self.delays_ms.insert(format!("{:.4}", latitude), delay_ms);
        self
    }
}

impl AreaProvider for CannedProvider {
    fn lookup(
        &self,
        latitude: f64,
        _longitude: f64,
        _search_radius: f64,
        _max_results: u32,
    ) -> Result<Option<AreaRecord>, AreaError> {
        let key = format!("{:.4}", latitude);
        if let Some(delay) = self.delays_ms.get(&key) {
            thread::sleep(Duration::from_millis(*delay));
        }
        self.responses.get(&key).cloned().unwrap_or(Ok(None))
    }
}

// ---------------------------------------------------------------------------
// Feed fixture
// ---------------------------------------------------------------------------

/// Six detections; four above the default threshold of 90. The sub-threshold
/// rows sit in the middle to prove filtering doesn't disturb order.
fn feed_csv() -> &'static str {
    "\
latitude,longitude,brightness,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_t31,frp,daynight
38.0000,-122.0000,330.7,1.1,1.0,2020-09-28,0915,Terra,MODIS,96,6.03,301.2,45.6,D
38.1000,-122.1000,311.4,1.3,1.1,2020-09-28,0915,Terra,MODIS,54,6.03,298.7,12.1,D
38.2000,-122.2000,325.9,1.2,1.1,2020-09-28,0915,Terra,MODIS,92,6.03,300.5,38.2,D
38.3000,-122.3000,305.2,1.4,1.2,2020-09-28,0915,Terra,MODIS,88,6.03,297.1,8.3,D
38.4000,-122.4000,342.8,1.0,1.0,2020-09-28,0915,Terra,MODIS,100,6.03,303.9,67.4,D
38.5000,-122.5000,335.1,1.1,1.0,2020-09-28,0915,Terra,MODIS,97,6.03,302.4,51.0,D
"
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn full_run_ranks_by_severity_and_reports_counts() {
    let detections = parse_detections(feed_csv()).expect("feed fixture should parse");
    assert_eq!(detections.len(), 6);

    // At these magnitudes home value dominates the weighted sum, so the
    // ranking follows it: 96161 (600k) > 95448 (500k) > 95441 (400k) >
    // 89049 (200k).
    let provider = CannedProvider::new()
        .with(38.0, Ok(Some(area_record("89049", 40_000.0, 200_000.0, 100.0, 800.0))))
        .with(38.2, Ok(Some(area_record("95448", 60_000.0, 500_000.0, 900.0, 5_000.0))))
        .with(38.4, Ok(Some(area_record("95441", 55_000.0, 400_000.0, 500.0, 2_000.0))))
        .with(38.5, Ok(Some(area_record("96161", 70_000.0, 600_000.0, 50.0, 9_000.0))));

    let summary = process_detections(Arc::new(provider), detections, &ServiceConfig::default());

    assert_eq!(summary.counts.raw, 6);
    assert_eq!(summary.counts.filtered, 4);
    assert_eq!(summary.counts.validated, 4);
    assert_eq!(summary.counts.ranked, 4);
    assert_eq!(summary.counts.lookup_misses, 0);

    let report = match summary.outcome {
        ScoreOutcome::Ranked(report) => report,
        other => panic!("expected a ranked report, got {:?}", other),
    };

    let ranked: Vec<&str> = report
        .order
        .iter()
        .map(|&i| report.scored.dataset.sources[i].zipcode.as_str())
        .collect();
    assert_eq!(ranked, vec!["96161", "95448", "95441", "89049"]);

    // Rather than pin exact score values, check the normalized column's
    // population property.
    let values: Vec<f64> = report
        .scored
        .normalized
        .iter()
        .filter_map(|s| s.value())
        .collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    assert!(mean.abs() < 1e-9, "normalized scores should center on 0");
}

#[test]
fn dataset_order_matches_filter_order_not_completion_order() {
    let detections = parse_detections(feed_csv()).expect("feed fixture should parse");

    // The first dispatched lookup finishes last, the last finishes first.
    let provider = CannedProvider::new()
        .with(38.0, Ok(Some(area_record("zip-a", 10_000.0, 100_000.0, 10.0, 100.0))))
        .with_delay(38.0, 120)
        .with(38.2, Ok(Some(area_record("zip-b", 20_000.0, 200_000.0, 20.0, 200.0))))
        .with_delay(38.2, 80)
        .with(38.4, Ok(Some(area_record("zip-c", 30_000.0, 300_000.0, 30.0, 300.0))))
        .with_delay(38.4, 40)
        .with(38.5, Ok(Some(area_record("zip-d", 40_000.0, 400_000.0, 40.0, 400.0))));

    let summary = process_detections(Arc::new(provider), detections, &ServiceConfig::default());

    let report = match summary.outcome {
        ScoreOutcome::Ranked(report) => report,
        other => panic!("expected a ranked report, got {:?}", other),
    };

    let discovery_order: Vec<&str> = report
        .scored
        .dataset
        .sources
        .iter()
        .map(|s| s.zipcode.as_str())
        .collect();
    assert_eq!(
        discovery_order,
        vec!["zip-a", "zip-b", "zip-c", "zip-d"],
        "dataset rows must follow filter order regardless of lookup timing"
    );
}

#[test]
fn misses_and_incomplete_records_degrade_without_failing_the_run() {
    let detections = parse_detections(feed_csv()).expect("feed fixture should parse");

    let mut incomplete = area_record("89049", 40_000.0, 200_000.0, 100.0, 800.0);
    incomplete.attributes.remove(FIELD_HOME_VALUE);

    let provider = CannedProvider::new()
        .with(38.0, Ok(Some(area_record("95448", 60_000.0, 500_000.0, 900.0, 5_000.0))))
        .with(38.2, Ok(None)) // open water
        .with(38.4, Err(AreaError::Timeout))
        .with(38.5, Ok(Some(incomplete)));

    let summary = process_detections(Arc::new(provider), detections, &ServiceConfig::default());

    assert_eq!(summary.counts.filtered, 4);
    assert_eq!(summary.counts.lookup_misses, 2, "no-match + timeout");
    assert_eq!(summary.counts.incomplete, 1);
    assert_eq!(summary.counts.validated, 1);

    // One validated row is not enough to normalize — a reported outcome,
    // never a crash.
    assert!(matches!(
        summary.outcome,
        ScoreOutcome::NormalizationUndefined(_)
    ));
}

#[test]
fn ranked_csv_has_expected_shape_end_to_end() {
    let detections = parse_detections(feed_csv()).expect("feed fixture should parse");

    let provider = CannedProvider::new()
        .with(38.0, Ok(Some(area_record("95448", 60_000.0, 500_000.0, 900.0, 5_000.0))))
        .with(38.2, Ok(Some(area_record("95441", 55_000.0, 400_000.0, 500.0, 2_000.0))))
        .with(38.4, Ok(Some(area_record("89049", 40_000.0, 200_000.0, 100.0, 800.0))))
        .with(38.5, Ok(None));

    let summary = process_detections(Arc::new(provider), detections, &ServiceConfig::default());

    let report = match summary.outcome {
        ScoreOutcome::Ranked(report) => report,
        other => panic!("expected a ranked report, got {:?}", other),
    };

    let mut buffer = Vec::new();
    report.write_csv(&mut buffer).expect("CSV write should succeed");
    let text = String::from_utf8(buffer).expect("CSV is UTF-8");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "source_area,median_household_income,median_home_value,population_density,number_housing_units,normalized_severity_score"
    );
    assert_eq!(lines.len(), 4, "header plus one line per ranked row");
    assert!(lines[1].starts_with("95448,60000,500000,900,5000,"));
    assert!(lines[3].starts_with("89049,"));
}
