/// firesev_service: wildfire detection severity ranking service.
///
/// # Module structure
///
/// ```text
/// firesev_service
/// ├── model     — shared data types (Detection, AreaRecord, FeedError, …)
/// ├── config    — run configuration loader (firesev.toml)
/// ├── logging   — leveled, source-tagged console/file logging
/// ├── ingest
/// │   ├── firms — NASA FIRMS area CSV API: URL construction + CSV parsing
/// │   ├── areas — area attribute API: AreaProvider seam + HTTP client
/// │   └── fixtures (test only) — representative API response payloads
/// ├── filter    — confidence-threshold filtering of raw detections
/// ├── validate  — required-field validation + positional breakdown extraction
/// ├── dataset   — column-oriented assembly of validated rows
/// ├── analysis
/// │   └── severity — weighted scoring + z-score normalization
/// ├── report    — ranked ordering, CSV output, stage counts
/// └── pipeline  — orchestration (fetch, filter, concurrent enrich, score)
/// ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod filter;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod validate;
