/// Ingest layer: external data source clients.
///
/// Submodules:
/// - `firms` — NASA FIRMS area CSV API: URL construction + CSV parsing
/// - `areas` — area attribute API: the `AreaProvider` seam + HTTP client
/// - `fixtures` (test only) — representative API response payloads

pub mod areas;
pub mod firms;

#[cfg(test)]
pub mod fixtures;
