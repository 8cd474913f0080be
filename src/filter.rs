/// Confidence filtering for raw detections.
///
/// The first pipeline stage: instrument confidence below the configured
/// threshold usually means smoke, sun glint, or a warm surface rather than
/// an active fire front worth enriching.

use crate::model::Detection;

/// Retains detections whose confidence is strictly greater than
/// `min_confidence`, preserving the relative order of the input.
///
/// The threshold is caller-supplied configuration; there is deliberately no
/// default here.
pub fn filter_by_confidence(detections: &[Detection], min_confidence: f64) -> Vec<Detection> {
    detections
        .iter()
        .filter(|d| d.confidence > min_confidence)
        .cloned()
        .collect()
}
