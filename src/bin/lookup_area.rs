//! One-shot area lookup for a single coordinate.
//!
//! Useful for checking what the area attribute service knows about a
//! location before wiring it into a full pipeline run.
//!
//! Usage:
//!   cargo run --bin lookup_area -- 41.850029 -87.650047

use std::env;
use std::process;

use firesev_service::config::ServiceConfig;
use firesev_service::ingest::areas::{AreaApiClient, AreaProvider};

fn main() {
    let args: Vec<String> = env::args().collect();

    let (latitude, longitude) = if args.len() == 3 {
        let latitude: f64 = args[1].parse().unwrap_or_else(|_| {
            eprintln!("Error: latitude must be a number, got '{}'", args[1]);
            process::exit(1);
        });
        let longitude: f64 = args[2].parse().unwrap_or_else(|_| {
            eprintln!("Error: longitude must be a number, got '{}'", args[2]);
            process::exit(1);
        });
        (latitude, longitude)
    } else if args.len() == 1 {
        // Chicago Loop, a coordinate the area service always knows.
        (41.850029, -87.650047)
    } else {
        eprintln!("Usage: {} [LATITUDE LONGITUDE]", args[0]);
        process::exit(1);
    };

    let config = ServiceConfig::default();
    let client = AreaApiClient::new(&config.pipeline.area_api_url);

    println!("🔎 Looking up area for ({}, {})...", latitude, longitude);

    match client.lookup(
        latitude,
        longitude,
        config.pipeline.search_radius_miles,
        config.pipeline.max_results,
    ) {
        Ok(Some(record)) => {
            println!(
                "✓ {} ({})",
                record.zipcode,
                record.major_city.as_deref().unwrap_or("unknown city")
            );
            let mut names: Vec<&String> = record.attributes.keys().collect();
            names.sort();
            for name in names {
                println!("   {} = {}", name, record.attributes[name]);
            }
            println!(
                "   histograms: house_age[{}] degrees[{}] earnings[{}]",
                record.house_age.len(),
                record.degrees.len(),
                record.earnings.len()
            );
        }
        Ok(None) => {
            println!("✗ No area matched within {} miles", config.pipeline.search_radius_miles);
        }
        Err(e) => {
            eprintln!("❌ Lookup failed: {}", e);
            process::exit(1);
        }
    }
}
