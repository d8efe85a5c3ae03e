//! User interface components for sat-vision.
//!
//! This module provides the desktop window for uploading a satellite
//! image and viewing its recorded few-shot classification result.
//!
//! # Architecture
//!
//! The UI is split into focused submodules:
//! - [`state`]: worker thread event definitions
//! - [`widgets`]: small reusable render helpers
//! - [`app`]: main application logic
//!
//! All interaction state lives in
//! [`ClassifierSession`](crate::session::ClassifierSession), which the
//! window drives and renders; the network fetch happens on a background
//! thread and reports back over a channel.

mod app;
mod state;
mod widgets;

// Public API exports
pub use app::ClassifierApp;

use crate::config::Config;
use crate::error::{AppError, Result};
use std::path::PathBuf;

/// Launches the classifier window and blocks until it is closed.
///
/// # Arguments
/// * `config` - Application configuration with the service base URL
/// * `initial_image` - Optional image file to pre-select on startup
pub fn run(config: Config, initial_image: Option<PathBuf>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([980.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SatelliteVision AI",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ClassifierApp::new(config, initial_image)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| AppError::ui(format!("Failed to run UI: {}", e)))
}
