//! Reusable render helpers for the classifier window.
//!
//! These are small free functions so the main app's `update` stays
//! readable; none of them hold state.

use crate::display::{
    accuracy_badge, class_color, confidence_percentage, format_class_name, ConfidenceLevel,
};
use crate::prediction::{PredictionResult, ShotCount};
use eframe::egui;

/// Renders the 1-shot / 5-shot toggle pair. Returns `true` when the
/// configuration changed this frame.
pub fn shot_toggle(ui: &mut egui::Ui, shots: &mut ShotCount) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label("Learning Mode:");
        if ui
            .selectable_label(*shots == ShotCount::One, "1-Shot")
            .clicked()
        {
            *shots = ShotCount::One;
            changed = true;
        }
        if ui
            .selectable_label(*shots == ShotCount::Five, "5-Shot")
            .clicked()
        {
            *shots = ShotCount::Five;
            changed = true;
        }
    });
    changed
}

/// Small outlined badge, used for file metadata in the header row.
pub fn badge(ui: &mut egui::Ui, text: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(6, 2))
        .corner_radius(egui::CornerRadius::same(4))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small());
        });
}

/// Green/red banner stating whether the model got this image right.
pub fn accuracy_banner(ui: &mut egui::Ui, correct: bool) {
    let (fill, icon) = if correct {
        (egui::Color32::from_rgb(22, 163, 74), "✔")
    } else {
        (egui::Color32::from_rgb(220, 38, 38), "✘")
    };

    egui::Frame::group(ui.style())
        .fill(fill)
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(icon)
                        .color(egui::Color32::WHITE)
                        .size(18.0),
                );
                ui.label(
                    egui::RichText::new(accuracy_badge(correct))
                        .color(egui::Color32::WHITE)
                        .strong(),
                );
            });
        });
}

/// Colored card showing one class label (ground truth or prediction).
pub fn class_card(ui: &mut egui::Ui, title: &str, class_name: &str) {
    let bucket = class_color(class_name);
    egui::Frame::group(ui.style())
        .fill(bucket.fill())
        .stroke(egui::Stroke::new(1.0, bucket.text()))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(title).color(bucket.text()).small());
            ui.label(
                egui::RichText::new(format_class_name(class_name))
                    .color(bucket.text())
                    .strong()
                    .size(18.0),
            );
        });
}

/// Confidence percentage, qualitative level, and progress bar.
pub fn confidence_row(ui: &mut egui::Ui, confidence: f64) {
    let percentage = confidence_percentage(confidence);
    let level = ConfidenceLevel::from_percentage(percentage);

    ui.horizontal(|ui| {
        ui.label("Classification Confidence");
        ui.label(
            egui::RichText::new(format!("{}%", percentage))
                .strong()
                .size(20.0),
        );
        badge(ui, &level.to_string());
    });
    ui.add(egui::ProgressBar::new(percentage as f32 / 100.0).desired_height(12.0));
}

/// Four-cell episode metadata grid: split, shot, way, iteration.
pub fn metadata_grid(ui: &mut egui::Ui, result: &PredictionResult) {
    ui.columns(4, |cols| {
        metadata_cell(&mut cols[0], "Dataset Split", &result.split);
        metadata_cell(&mut cols[1], "Few-Shot", &format!("{}-shot", result.shot));
        metadata_cell(&mut cols[2], "N-Way", &format!("{}-way", result.way));
        metadata_cell(&mut cols[3], "Iteration", &format!("#{}", result.iteration));
    });
}

fn metadata_cell(ui: &mut egui::Ui, title: &str, value: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(6))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(title).small());
                ui.label(egui::RichText::new(value).strong());
            });
        });
}
