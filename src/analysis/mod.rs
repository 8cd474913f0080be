/// Data analysis for the wildfire severity service.
///
/// Submodules:
/// - `severity` — weighted severity scoring and z-score normalization.

pub mod severity;
