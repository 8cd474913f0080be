/// Pipeline orchestration: feed → filter → enrich → validate → score → rank.
///
/// Per-row failures (lookup misses, timeouts, incomplete records,
/// unscoreable rows) are counted and degrade locally; they never escalate
/// to a run failure. Only a detection feed failure is fatal, and it aborts
/// before any area lookups are issued — a partially fetched feed is never
/// enriched.
///
/// Area lookups are independent, read-only, and network-bound, so they run
/// on a bounded worker pool. Each result is tagged with its detection's
/// filter-order index and reassembled before validation: the final dataset
/// order always matches filter order, never lookup-completion order.

use std::fmt;
use std::sync::mpsc;
use std::sync::Arc;

use threadpool::ThreadPool;

use crate::analysis::severity::{self, NormalizationUndefined};
use crate::config::ServiceConfig;
use crate::dataset::build_dataset;
use crate::filter::filter_by_confidence;
use crate::ingest::areas::AreaProvider;
use crate::ingest::firms;
use crate::logging::{self, DataSource};
use crate::model::{AreaError, AreaRecord, Detection, FeedError};
use crate::report::{rank, RankedReport, StageCounts};
use crate::validate::{validate_record, Rejection};

// ---------------------------------------------------------------------------
// Run results
// ---------------------------------------------------------------------------

/// Fatal pipeline errors. Everything else degrades locally.
#[derive(Debug, PartialEq)]
pub enum PipelineError {
    /// The detection feed could not be fetched; no lookups were issued.
    SourceUnavailable(FeedError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::SourceUnavailable(e) => write!(f, "detection source unavailable: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<FeedError> for PipelineError {
    fn from(e: FeedError) -> Self {
        PipelineError::SourceUnavailable(e)
    }
}

/// What the scoring phase produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    /// A ranked table, ready to serialize.
    Ranked(RankedReport),
    /// The population could not be normalized; the report is header-only.
    NormalizationUndefined(NormalizationUndefined),
}

/// Everything a completed run reports: the outcome plus per-stage counts.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub counts: StageCounts,
    pub outcome: ScoreOutcome,
}

// ---------------------------------------------------------------------------
// Concurrent lookups
// ---------------------------------------------------------------------------

/// Issues one area lookup per detection on a bounded worker pool and returns
/// the results in detection order, regardless of completion order.
pub fn lookup_areas<P: AreaProvider + 'static>(
    provider: &Arc<P>,
    detections: &[Detection],
    search_radius: f64,
    max_results: u32,
    workers: usize,
) -> Vec<Result<Option<AreaRecord>, AreaError>> {
    let pool = ThreadPool::new(workers.max(1));
    let (tx, rx) = mpsc::channel();

    for (index, detection) in detections.iter().enumerate() {
        let provider = Arc::clone(provider);
        let detection = detection.clone();
        let tx = tx.clone();

        pool.execute(move || {
            let result = provider.lookup(
                detection.latitude,
                detection.longitude,
                search_radius,
                max_results,
            );
            // The receiver only disappears if the caller bailed; nothing to
            // do with the result in that case.
            let _ = tx.send((index, result));
        });
    }
    drop(tx);

    let mut results: Vec<Option<Result<Option<AreaRecord>, AreaError>>> =
        (0..detections.len()).map(|_| None).collect();

    for (index, result) in rx {
        results[index] = Some(result);
    }

    results
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| Err(AreaError::Network("lookup worker terminated".to_string())))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pipeline stages
// ---------------------------------------------------------------------------

/// Runs the enrichment-and-scoring pipeline over an already-fetched feed.
pub fn process_detections<P: AreaProvider + 'static>(
    provider: Arc<P>,
    raw_detections: Vec<Detection>,
    config: &ServiceConfig,
) -> RunSummary {
    let mut counts = StageCounts {
        raw: raw_detections.len(),
        ..StageCounts::default()
    };

    let filtered = filter_by_confidence(&raw_detections, config.pipeline.min_confidence);
    counts.filtered = filtered.len();
    logging::info(
        DataSource::System,
        None,
        &format!(
            "{} of {} detections above confidence {}",
            counts.filtered, counts.raw, config.pipeline.min_confidence
        ),
    );

    let lookups = lookup_areas(
        &provider,
        &filtered,
        config.pipeline.search_radius_miles,
        config.pipeline.max_results,
        config.pipeline.lookup_workers,
    );

    let mut rows = Vec::with_capacity(filtered.len());

    for (detection, lookup) in filtered.iter().zip(lookups) {
        let coordinate = format!("{:.4},{:.4}", detection.latitude, detection.longitude);

        let record = match lookup {
            Ok(record) => record,
            Err(AreaError::Timeout) => {
                // Graceful degradation: a slow lookup is treated as a miss.
                logging::debug(DataSource::Area, Some(&coordinate), "lookup timed out");
                counts.lookup_misses += 1;
                continue;
            }
            Err(e) => {
                logging::log_area_failure(&coordinate, &e);
                counts.provider_errors += 1;
                continue;
            }
        };

        match validate_record(record) {
            Ok(row) => rows.push(row),
            Err(Rejection::NoArea) => {
                logging::debug(DataSource::Area, Some(&coordinate), "no area matched");
                counts.lookup_misses += 1;
            }
            Err(rejection) => {
                logging::warn(
                    DataSource::Area,
                    Some(&coordinate),
                    &format!("record rejected: {}", rejection),
                );
                counts.incomplete += 1;
            }
        }
    }

    counts.validated = rows.len();

    let dataset = build_dataset(rows);

    match severity::score_dataset(dataset) {
        Ok(scored) => {
            counts.unscoreable = scored
                .normalized
                .iter()
                .filter(|s| s.is_undefined())
                .count();
            let report = rank(scored);
            counts.ranked = report.order.len();

            RunSummary {
                counts,
                outcome: ScoreOutcome::Ranked(report),
            }
        }
        Err(undefined) => {
            logging::warn(DataSource::System, None, &undefined.to_string());
            RunSummary {
                counts,
                outcome: ScoreOutcome::NormalizationUndefined(undefined),
            }
        }
    }
}

/// Full run: fetch the feed, then process it. A feed failure is returned as
/// `PipelineError::SourceUnavailable` before any lookups happen.
pub fn run<P: AreaProvider + 'static>(
    feed_client: &reqwest::blocking::Client,
    map_key: &str,
    provider: Arc<P>,
    config: &ServiceConfig,
) -> Result<RunSummary, PipelineError> {
    let detections = firms::fetch_detections(
        feed_client,
        map_key,
        &config.feed.source,
        &config.feed.area,
        config.feed.day_range,
    )?;

    Ok(process_detections(provider, detections, config))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
