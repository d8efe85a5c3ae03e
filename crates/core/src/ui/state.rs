//! Messages from background worker threads to the UI thread.

use crate::error::Result;
use crate::prediction::PredictionResult;
use image::DynamicImage;

/// Events received from background worker threads.
///
/// Every event carries the selection generation it was produced for;
/// the session discards events addressed to a superseded selection.
pub(crate) enum WorkerEvent {
    /// A prediction lookup finished (successfully or not).
    Prediction {
        generation: u64,
        outcome: Result<PredictionResult>,
    },
    /// A preview image finished decoding.
    Preview {
        generation: u64,
        image: DynamicImage,
    },
}
