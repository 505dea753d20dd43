pub mod config;
pub mod errors;
pub mod mocks;
pub mod model;
pub mod report;
pub mod request;
pub mod traits;

use std::io::Write;

use tracing::{debug, info, warn};

pub use config::Config;
pub use errors::{DetectError, ErrorKind, Result};
pub use model::{ClientSettings, RekognitionDetector};
pub use request::{DetectionRequest, MAX_LABELS_LIMIT};
pub use traits::*;

/// Fetch the labels for `request` and collect them in service order.
///
/// A request for zero labels never reaches the detector. Responses longer than
/// the requested maximum are cut down to it.
pub fn detect<D: LabelDetector>(detector: &D, request: &DetectionRequest) -> Result<Vec<Label>> {
    if request.max_labels() == 0 {
        debug!("max_labels is 0, skipping detection");
        return Ok(Vec::new());
    }

    debug!(
        region = detector.region(),
        bucket = request.bucket(),
        key = request.key(),
        max_labels = request.max_labels(),
        min_confidence = ?request.min_confidence(),
        "detecting labels"
    );
    let mut labels = detector.detect_labels(request)?;

    let max_labels = request.max_labels() as usize;
    if labels.len() > max_labels {
        warn!(
            returned = labels.len(),
            max_labels, "service returned more labels than requested, truncating"
        );
        labels.truncate(max_labels);
    }
    info!(count = labels.len(), "labels detected");
    Ok(labels)
}

/// Detect labels and write the report to `out`.
///
/// Nothing is written unless detection succeeds for the whole sequence.
pub fn run<D: LabelDetector, W: Write>(
    detector: &D,
    request: &DetectionRequest,
    out: &mut W,
) -> Result<()> {
    let labels = detect(detector, request)?;
    out.write_all(report::render(&labels).as_bytes())?;
    out.flush()?;
    Ok(())
}
