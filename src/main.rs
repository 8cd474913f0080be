//! Wildfire Severity Report Service - Main Binary
//!
//! A batch pipeline that:
//! 1. Fetches active wildfire detections from the NASA FIRMS area API
//! 2. Keeps high-confidence detections and enriches each with
//!    socio-economic attributes for its surrounding area
//! 3. Computes a z-score-normalized severity per location
//! 4. Writes a ranked CSV report plus per-stage row counts
//!
//! Usage:
//!   cargo run --release                                  # Run on defaults
//!   cargo run --release -- --min-confidence 95           # Stricter filter
//!   cargo run --release -- --output /tmp/report.csv      # Custom output
//!   cargo run --release -- --config firesev.toml         # Custom config
//!
//! Environment:
//!   FIRMS_MAP_KEY - NASA FIRMS API map key (https://firms.modaps.eosdis.nasa.gov/api/)

use std::env;
use std::path::Path;
use std::process;
use std::sync::Arc;

use firesev_service::config::{self, ServiceConfig};
use firesev_service::ingest::areas::AreaApiClient;
use firesev_service::logging::{self, LogLevel};
use firesev_service::model::FeedError;
use firesev_service::pipeline::{self, ScoreOutcome};
use firesev_service::report;

fn main() {
    println!("🔥 Wildfire Severity Report Service");
    println!("====================================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut min_confidence: Option<f64> = None;
    let mut output_path: Option<String> = None;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--min-confidence" => {
                if i + 1 < args.len() {
                    min_confidence = args[i + 1].parse().ok();
                    if min_confidence.is_none() {
                        eprintln!("Error: --min-confidence requires a number");
                        process::exit(1);
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --min-confidence requires a number");
                    process::exit(1);
                }
            }
            "--output" => {
                if i + 1 < args.len() {
                    output_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --output requires a path");
                    process::exit(1);
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --config requires a path");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!(
                    "Usage: {} [--min-confidence N] [--output PATH] [--config PATH]",
                    args[0]
                );
                process::exit(1);
            }
        }
    }

    // Load configuration, then apply CLI overrides
    let mut config: ServiceConfig = match config_path {
        Some(path) => config::load_config(&path),
        None => ServiceConfig::default(),
    };
    if let Some(threshold) = min_confidence {
        config.pipeline.min_confidence = threshold;
    }
    if let Some(path) = output_path {
        config.pipeline.output_path = path;
    }

    logging::init_logger(LogLevel::Info, None);

    // FIRMS requires a per-user map key
    dotenv::dotenv().ok();
    let map_key = match env::var("FIRMS_MAP_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => {
            eprintln!("\n❌ {}\n", FeedError::MissingKey);
            eprintln!("Request a key at https://firms.modaps.eosdis.nasa.gov/api/");
            eprintln!("then export FIRMS_MAP_KEY or add it to .env\n");
            process::exit(1);
        }
    };

    println!("📡 Fetching detections...");
    println!("   Source: {} over {}", config.feed.source, config.feed.area);
    println!("   Confidence threshold: {}", config.pipeline.min_confidence);
    println!(
        "   Lookup radius: {} miles, {} workers\n",
        config.pipeline.search_radius_miles, config.pipeline.lookup_workers
    );

    let feed_client = reqwest::blocking::Client::new();
    let provider = Arc::new(AreaApiClient::new(&config.pipeline.area_api_url));

    let summary = match pipeline::run(&feed_client, &map_key, provider, &config) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("\n❌ Run aborted: {}\n", e);
            process::exit(1);
        }
    };

    let output = Path::new(&config.pipeline.output_path);
    match &summary.outcome {
        ScoreOutcome::Ranked(ranked) => {
            if let Err(e) = ranked.write_csv_file(output) {
                eprintln!("\n❌ Failed to write {}: {}\n", output.display(), e);
                process::exit(1);
            }
            println!(
                "✓ Ranked report written to {} ({} rows)\n",
                output.display(),
                ranked.order.len()
            );
        }
        ScoreOutcome::NormalizationUndefined(reason) => {
            if let Err(e) = report::write_empty_csv_file(output) {
                eprintln!("\n❌ Failed to write {}: {}\n", output.display(), e);
                process::exit(1);
            }
            println!("⚠ {} — wrote header-only report to {}\n", reason, output.display());
        }
    }

    println!("📊 Stage counts:");
    println!("   {}", summary.counts.render());
}
