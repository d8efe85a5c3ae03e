//! Derived display values for classification results.
//!
//! Everything here is pure string/number formatting: confidence
//! percentages, qualitative confidence levels, human-readable class
//! names, and the color bucket a land-cover label renders in.

use eframe::egui::Color32;
use std::fmt;

/// Rounds a confidence value in [0, 1] to a whole percentage.
pub fn confidence_percentage(confidence: f64) -> u8 {
    (confidence * 100.0).round() as u8
}

/// Qualitative confidence bucket derived from the rounded percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 90 {
            Self::High
        } else if percentage >= 70 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        write!(f, "{}", label)
    }
}

/// Inserts a space before each internal capital letter.
///
/// Dataset labels are CamelCase (`DenseResidential`); the UI shows them
/// as separate words (`Dense Residential`). Single-word labels pass
/// through unchanged.
pub fn format_class_name(class_name: &str) -> String {
    let mut formatted = String::with_capacity(class_name.len() + 4);
    for (i, c) in class_name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            formatted.push(' ');
        }
        formatted.push(c);
    }
    formatted
}

/// Presentation color bucket for a land-cover class label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorBucket {
    Red,
    Orange,
    Yellow,
    Blue,
    Purple,
    Gray,
    Green,
    Cyan,
    Lime,
    /// Neutral fallback when no category keyword matches.
    Slate,
}

impl ColorBucket {
    /// Pale fill color for the class card background.
    pub fn fill(self) -> Color32 {
        match self {
            Self::Red => Color32::from_rgb(254, 226, 226),
            Self::Orange => Color32::from_rgb(255, 237, 213),
            Self::Yellow => Color32::from_rgb(254, 249, 195),
            Self::Blue => Color32::from_rgb(219, 234, 254),
            Self::Purple => Color32::from_rgb(243, 232, 255),
            Self::Gray => Color32::from_rgb(243, 244, 246),
            Self::Green => Color32::from_rgb(220, 252, 231),
            Self::Cyan => Color32::from_rgb(207, 250, 254),
            Self::Lime => Color32::from_rgb(236, 252, 203),
            Self::Slate => Color32::from_rgb(241, 245, 249),
        }
    }

    /// Dark text color paired with [`fill`](Self::fill).
    pub fn text(self) -> Color32 {
        match self {
            Self::Red => Color32::from_rgb(153, 27, 27),
            Self::Orange => Color32::from_rgb(154, 52, 18),
            Self::Yellow => Color32::from_rgb(133, 77, 14),
            Self::Blue => Color32::from_rgb(30, 64, 175),
            Self::Purple => Color32::from_rgb(107, 33, 168),
            Self::Gray => Color32::from_rgb(31, 41, 55),
            Self::Green => Color32::from_rgb(22, 101, 52),
            Self::Cyan => Color32::from_rgb(21, 94, 117),
            Self::Lime => Color32::from_rgb(63, 98, 18),
            Self::Slate => Color32::from_rgb(30, 41, 59),
        }
    }
}

/// Keyword-to-bucket table, evaluated top to bottom.
///
/// This is an ordered slice rather than a map: several keywords can match
/// one label ("DenseResidential" contains both "Dense" and "Residential"),
/// and the earlier entry must win every time.
const CLASS_COLOR_TABLE: &[(&str, ColorBucket)] = &[
    ("Dense", ColorBucket::Red),
    ("Medium", ColorBucket::Orange),
    ("Sparse", ColorBucket::Yellow),
    ("Residential", ColorBucket::Blue),
    ("Commercial", ColorBucket::Purple),
    ("Industrial", ColorBucket::Gray),
    ("Forest", ColorBucket::Green),
    ("Water", ColorBucket::Cyan),
    ("Agricultural", ColorBucket::Lime),
];

/// Assigns a class label to its color bucket by first substring match.
pub fn class_color(class_name: &str) -> ColorBucket {
    CLASS_COLOR_TABLE
        .iter()
        .find(|(keyword, _)| class_name.contains(keyword))
        .map(|&(_, bucket)| bucket)
        .unwrap_or(ColorBucket::Slate)
}

/// Badge text for the accuracy banner.
pub fn accuracy_badge(correct: bool) -> &'static str {
    if correct {
        "Accurate Classification"
    } else {
        "Misclassification Detected"
    }
}

/// File size rendered as megabytes with two decimals, e.g. `1.24 MB`.
pub fn format_file_size(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_rounds_to_whole_percentage() {
        assert_eq!(confidence_percentage(0.873), 87);
        assert_eq!(confidence_percentage(0.95), 95);
        assert_eq!(confidence_percentage(0.0), 0);
        assert_eq!(confidence_percentage(1.0), 100);
        assert_eq!(confidence_percentage(0.005), 1);
    }

    #[test]
    fn confidence_level_thresholds() {
        assert_eq!(ConfidenceLevel::from_percentage(95), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_percentage(90), ConfidenceLevel::High);
        assert_eq!(
            ConfidenceLevel::from_percentage(87),
            ConfidenceLevel::Medium
        );
        assert_eq!(
            ConfidenceLevel::from_percentage(70),
            ConfidenceLevel::Medium
        );
        assert_eq!(ConfidenceLevel::from_percentage(65), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::High.to_string(), "High");
    }

    #[test]
    fn class_names_split_on_internal_capitals() {
        assert_eq!(format_class_name("DenseResidential"), "Dense Residential");
        assert_eq!(format_class_name("Forest"), "Forest");
        assert_eq!(
            format_class_name("MediumResidentialArea"),
            "Medium Residential Area"
        );
        assert_eq!(format_class_name(""), "");
    }

    #[test]
    fn first_keyword_match_wins() {
        // "DenseResidentialArea" contains both "Dense" and "Residential";
        // "Dense" is earlier in the table and must win.
        assert_eq!(class_color("DenseResidentialArea"), ColorBucket::Red);
        assert_eq!(class_color("Residential"), ColorBucket::Blue);
        assert_eq!(class_color("Forest"), ColorBucket::Green);
        assert_eq!(class_color("Beach"), ColorBucket::Slate);
    }

    #[test]
    fn accuracy_badge_text() {
        assert_eq!(accuracy_badge(true), "Accurate Classification");
        assert_eq!(accuracy_badge(false), "Misclassification Detected");
    }

    #[test]
    fn file_size_in_megabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.00 MB");
        assert_eq!(format_file_size(1_300_234), "1.24 MB");
    }
}
