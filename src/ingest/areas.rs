/// Area attribute API client.
///
/// Maps a detection coordinate to socio-economic attributes for the
/// surrounding area (ZCTA-level census aggregates). The lookup service is a
/// JSON-over-HTTP sidecar:
///   GET {base}/search?latitude=…&longitude=…&radius=…&returns=…
///
/// The service may legitimately find nothing for a coordinate (open water,
/// unincorporated land); that is `Ok(None)`, not an error. Lookups are
/// network-bound and slow relative to the rest of the pipeline, which is why
/// the pipeline runs them on a worker pool.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::model::{AreaError, AreaRecord, BreakdownEntry};

/// Per-lookup deadline. An exceeded deadline is reported as
/// `AreaError::Timeout` and degraded to a miss by the pipeline.
const LOOKUP_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// Provider seam
// ---------------------------------------------------------------------------

/// A coordinate-to-area-attributes lookup.
///
/// The pipeline consumes lookups through this trait so tests can substitute
/// a canned provider for the HTTP client. Implementations must be safe to
/// call from multiple worker threads; lookups are independent and read-only.
pub trait AreaProvider: Send + Sync {
    /// Returns the canonical area record near the coordinate, or `Ok(None)`
    /// when no area matches within `search_radius` miles. At most
    /// `max_results` candidates are requested; the first is canonical.
    fn lookup(
        &self,
        latitude: f64,
        longitude: f64,
        search_radius: f64,
        max_results: u32,
    ) -> Result<Option<AreaRecord>, AreaError>;
}

// ---------------------------------------------------------------------------
// Serde structures for lookup response deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct LookupResponse {
    results: Vec<RawAreaRecord>,
}

#[derive(Deserialize)]
struct RawAreaRecord {
    zipcode: String,
    #[serde(default)]
    major_city: Option<String>,
    #[serde(default)]
    year_housing_was_built: Vec<BreakdownEntry>,
    #[serde(default)]
    educational_attainment: Vec<BreakdownEntry>,
    #[serde(default)]
    source_of_earnings: Vec<BreakdownEntry>,
    /// Everything else in the object: the scalar attribute bag. Values stay
    /// raw JSON here; the validator decides what counts as numeric.
    #[serde(flatten)]
    attributes: HashMap<String, Value>,
}

impl From<RawAreaRecord> for AreaRecord {
    fn from(raw: RawAreaRecord) -> Self {
        AreaRecord {
            zipcode: raw.zipcode,
            major_city: raw.major_city,
            attributes: raw.attributes,
            house_age: raw.year_housing_was_built,
            degrees: raw.educational_attainment,
            earnings: raw.source_of_earnings,
        }
    }
}

// ---------------------------------------------------------------------------
// URL construction and parsing
// ---------------------------------------------------------------------------

/// Builds a lookup URL for the given coordinate and search parameters.
pub fn build_lookup_url(
    base_url: &str,
    latitude: f64,
    longitude: f64,
    search_radius: f64,
    max_results: u32,
) -> String {
    format!(
        "{}/search?latitude={}&longitude={}&radius={}&returns={}",
        base_url, latitude, longitude, search_radius, max_results
    )
}

/// Parses a lookup response body into the canonical (first) area record.
///
/// # Errors
/// - `AreaError::Parse` — malformed or unexpected JSON structure.
pub fn parse_lookup_response(json: &str) -> Result<Option<AreaRecord>, AreaError> {
    let response: LookupResponse = serde_json::from_str(json)
        .map_err(|e| AreaError::Parse(format!("JSON deserialization failed: {}", e)))?;

    Ok(response.results.into_iter().next().map(AreaRecord::from))
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Blocking HTTP implementation of `AreaProvider`.
pub struct AreaApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl AreaApiClient {
    /// Builds a client against the given base URL with the standard
    /// per-lookup timeout.
    ///
    /// # Panics
    /// Panics if the TLS backend cannot be initialized. This is intentional —
    /// the service cannot operate without a working HTTP client.
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| panic!("Failed to build HTTP client: {}", e));

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl AreaProvider for AreaApiClient {
    fn lookup(
        &self,
        latitude: f64,
        longitude: f64,
        search_radius: f64,
        max_results: u32,
    ) -> Result<Option<AreaRecord>, AreaError> {
        let url = build_lookup_url(&self.base_url, latitude, longitude, search_radius, max_results);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AreaError::Timeout
                } else {
                    AreaError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AreaError::Http(status.as_u16()));
        }

        let body = response.text().map_err(|e| {
            if e.is_timeout() {
                AreaError::Timeout
            } else {
                AreaError::Network(e.to_string())
            }
        })?;

        parse_lookup_response(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
