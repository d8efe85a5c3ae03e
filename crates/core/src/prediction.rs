//! Data model for few-shot classification results.

use serde::Deserialize;
use std::fmt;

/// Few-shot learning configuration: how many labeled examples per class
/// the model was given. The evaluation only records 1-shot and 5-shot runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShotCount {
    One,
    #[default]
    Five,
}

impl ShotCount {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Five => 5,
        }
    }
}

impl fmt::Display for ShotCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl TryFrom<u8> for ShotCount {
    type Error = crate::error::AppError;

    fn try_from(value: u8) -> crate::error::Result<Self> {
        match value {
            1 => Ok(Self::One),
            5 => Ok(Self::Five),
            other => Err(crate::error::AppError::config(format!(
                "shot count must be 1 or 5, got {}",
                other
            ))),
        }
    }
}

/// A recorded classification result for one image in one evaluation episode.
///
/// This mirrors the JSON shape returned by the prediction service exactly;
/// a body missing any field (or with a wrong type) fails to decode.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub filename: String,
    /// Dataset partition the image belongs to (e.g., "test").
    pub split: String,
    /// Ground-truth label.
    pub true_class: String,
    /// Model output label.
    pub predicted_class: String,
    /// Whether the service judged the two labels equal.
    pub correct: bool,
    /// Model certainty, in [0, 1].
    pub confidence: f64,
    /// Labeled examples per class in the episode.
    pub shot: u32,
    /// Number of classes in the episode.
    pub way: u32,
    /// Evaluation episode index.
    pub iteration: u32,
}

impl PredictionResult {
    /// One-line episode metadata, e.g. `test / 5-shot / 5-way / #12`.
    pub fn metadata_summary(&self) -> String {
        format!(
            "{} / {}-shot / {}-way / #{}",
            self.split, self.shot, self.way, self.iteration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PredictionResult {
        PredictionResult {
            filename: "tile_042".to_string(),
            split: "test".to_string(),
            true_class: "Forest".to_string(),
            predicted_class: "Forest".to_string(),
            correct: true,
            confidence: 0.95,
            shot: 5,
            way: 5,
            iteration: 12,
        }
    }

    #[test]
    fn metadata_summary_format() {
        assert_eq!(sample().metadata_summary(), "test / 5-shot / 5-way / #12");
    }

    #[test]
    fn decodes_exact_shape() {
        let json = r#"{
            "filename": "tile_042",
            "split": "test",
            "true_class": "Forest",
            "predicted_class": "Forest",
            "correct": true,
            "confidence": 0.95,
            "shot": 5,
            "way": 5,
            "iteration": 12
        }"#;
        let parsed: PredictionResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn rejects_missing_fields() {
        let json = r#"{"filename": "tile_042", "split": "test"}"#;
        assert!(serde_json::from_str::<PredictionResult>(json).is_err());
    }

    #[test]
    fn shot_count_conversions() {
        assert_eq!(ShotCount::try_from(1).unwrap(), ShotCount::One);
        assert_eq!(ShotCount::try_from(5).unwrap(), ShotCount::Five);
        assert!(ShotCount::try_from(3).is_err());
        assert_eq!(ShotCount::Five.to_string(), "5");
    }
}
