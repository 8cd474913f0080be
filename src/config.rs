/// Run configuration loader - parses firesev.toml
///
/// Separates tunable run parameters from code, making it easy to adjust the
/// confidence threshold, lookup radius, or feed window without recompiling
/// the service. Every field has a default, so the file itself is optional;
/// a malformed file is a hard error.

use serde::Deserialize;
use std::fs;

/// Pipeline knobs: filtering, lookup, and output parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Detections at or below this confidence are discarded.
    /// Historically tuned between 90 and 95.
    pub min_confidence: f64,

    /// Radius, in miles, of the area search around each detection.
    pub search_radius_miles: f64,

    /// Maximum candidate areas requested per lookup. The first candidate
    /// is canonical; the rest bound the response size.
    pub max_results: u32,

    /// Worker threads for concurrent area lookups.
    pub lookup_workers: usize,

    /// Base URL of the area attribute lookup service.
    pub area_api_url: String,

    /// Where the ranked report CSV is written.
    pub output_path: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_confidence: 90.0,
            search_radius_miles: 30.0,
            max_results: 5,
            lookup_workers: 4,
            area_api_url: "http://localhost:8081".to_string(),
            output_path: "severity_report.csv".to_string(),
        }
    }
}

/// Detection feed parameters: which FIRMS product, where, and how far back.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// FIRMS source product. MODIS products report numeric 0-100 confidence.
    pub source: String,

    /// Bounding box as "west,south,east,north" in decimal degrees.
    pub area: String,

    /// How many days of detections to request (1-10 per the FIRMS API).
    pub day_range: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source: "MODIS_NRT".to_string(),
            // Conterminous United States.
            area: "-125,24,-66,49".to_string(),
            day_range: 1,
        }
    }
}

/// Root configuration structure for TOML parsing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub pipeline: PipelineConfig,
    pub feed: FeedConfig,
}

/// Loads service configuration from a TOML file.
///
/// # Panics
/// Panics if the file is missing or malformed. Callers that want to run on
/// defaults should not pass a config path at all (`ServiceConfig::default()`).
pub fn load_config(path: &str) -> ServiceConfig {
    let contents = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));

    toml::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
}
