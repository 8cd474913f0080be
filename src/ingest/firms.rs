/// NASA FIRMS area CSV API client.
///
/// Handles URL construction and CSV response parsing for the FIRMS active
/// fire endpoint:
///   https://firms.modaps.eosdis.nasa.gov/api/area/
///
/// The area endpoint returns one CSV row per detection. MODIS products
/// report confidence as a 0-100 number; see `fixtures.rs` for annotated
/// examples of the response shape.
///
/// A feed failure is fatal to the whole run: the pipeline never issues area
/// lookups for a partially fetched feed.

use crate::logging::{self, DataSource};
use crate::model::{Detection, FeedError};

const FIRMS_API_BASE: &str = "https://firms.modaps.eosdis.nasa.gov/api/area/csv";

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds a FIRMS area CSV URL for the given map key, source product,
/// bounding box ("west,south,east,north"), and day range (1-10).
///
/// # Example
/// ```ignore
/// let url = build_area_csv_url("MY_KEY", "MODIS_NRT", "-125,24,-66,49", 1);
/// ```
pub fn build_area_csv_url(map_key: &str, source: &str, area: &str, day_range: u32) -> String {
    format!(
        "{}/{}/{}/{}/{}",
        FIRMS_API_BASE, map_key, source, area, day_range
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a FIRMS area CSV body into a list of `Detection`s, preserving
/// feed order.
///
/// Rows with unparsable coordinate or confidence values are skipped with a
/// warning rather than failing the feed; a missing header column is a
/// `FeedError::Parse` because it means the response is not the expected
/// product at all.
///
/// # Errors
/// - `FeedError::Parse` — header row missing, or missing any of the
///   `latitude`, `longitude`, `confidence` columns.
pub fn parse_detections(body: &str) -> Result<Vec<Detection>, FeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FeedError::Parse(format!("unreadable header row: {}", e)))?
        .clone();

    let column = |name: &str| -> Result<usize, FeedError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| FeedError::Parse(format!("missing column '{}'", name)))
    };

    let lat_col = column("latitude")?;
    let lon_col = column("longitude")?;
    let conf_col = column("confidence")?;

    let mut detections = Vec::new();

    for (row_index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                logging::warn(
                    DataSource::Feed,
                    None,
                    &format!("skipping unreadable row {}: {}", row_index + 1, e),
                );
                continue;
            }
        };

        let field = |col: usize| record.get(col).unwrap_or("");

        let parsed = (
            field(lat_col).parse::<f64>(),
            field(lon_col).parse::<f64>(),
            field(conf_col).parse::<f64>(),
        );

        match parsed {
            (Ok(latitude), Ok(longitude), Ok(confidence)) => {
                detections.push(Detection {
                    latitude,
                    longitude,
                    confidence,
                });
            }
            _ => {
                logging::warn(
                    DataSource::Feed,
                    None,
                    &format!("skipping row {} with non-numeric fields", row_index + 1),
                );
            }
        }
    }

    Ok(detections)
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Fetches the detection feed and parses it into `Detection`s.
///
/// # Errors
/// - `FeedError::Network` — transport failure reaching FIRMS.
/// - `FeedError::Unavailable` — non-2xx HTTP status.
/// - `FeedError::Parse` — response body is not the expected CSV.
pub fn fetch_detections(
    client: &reqwest::blocking::Client,
    map_key: &str,
    source: &str,
    area: &str,
    day_range: u32,
) -> Result<Vec<Detection>, FeedError> {
    let url = build_area_csv_url(map_key, source, area, day_range);

    let response = client
        .get(&url)
        .send()
        .map_err(|e| FeedError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Unavailable(status.as_u16()));
    }

    let body = response
        .text()
        .map_err(|e| FeedError::Network(e.to_string()))?;

    parse_detections(&body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
