//! SatVision Core Library
//!
//! This library provides the core functionality for the SatVision satellite
//! imagery viewer, including the interaction state machine, prediction
//! lookup client, and display formatting.
//!
//! # Overview
//!
//! SatVision lets users pick a satellite image, choose a few-shot learning
//! configuration (1-shot or 5-shot), and look up the recorded classification
//! result for that image from an external service. The library handles:
//!
//! - **Interaction State**: File selection and request lifecycle via [`session`]
//! - **Result Lookup**: HTTP client for the prediction service via [`client`]
//! - **Display Formatting**: Confidence, class names, and colors via [`display`]
//! - **User Interface**: The upload-and-classify window via [`ui`]
//!
//! The actual few-shot classifier lives entirely outside this crate; the
//! service is an opaque collaborator reached with a single GET per lookup.
//!
//! # Quick Start
//!
//! The simplest way to use the library is through the [`SatVision`] facade:
//!
//! ```ignore
//! use sat_vision_core::SatVision;
//!
//! // Initialize with environment configuration
//! let app = SatVision::new()?;
//!
//! // Launch the interactive window
//! app.run_interactive(None)?;
//! ```
//!
//! # Module Structure
//!
//! - [`client`]: Prediction service HTTP client
//! - [`config`]: Configuration loading and management
//! - [`display`]: Derived display values
//! - [`error`]: Error types and result aliases
//! - [`prediction`]: Classification result data model
//! - [`preview`]: Image preview decoding
//! - [`session`]: Interaction state machine
//! - [`ui`]: User interface components

pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod prediction;
pub mod preview;
pub mod session;
pub mod ui;

// Re-export primary types for convenience
pub use client::PredictionClient;
pub use config::Config;
pub use error::{AppError, Result};
pub use prediction::{PredictionResult, ShotCount};
pub use session::ClassifierSession;

use std::path::PathBuf;

/// Main entry point for the SatVision application.
///
/// This struct provides a facade over the various subsystems,
/// handling initialization and orchestration. It's the recommended
/// way to use the library for most use cases.
pub struct SatVision {
    config: Config,
}

impl SatVision {
    /// Creates a new SatVision instance with default configuration.
    ///
    /// Loads configuration from environment variables (including `.env`
    /// files).
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self { config })
    }

    /// Creates an instance with custom configuration.
    ///
    /// Use this when you need to override environment-based configuration,
    /// such as pointing at a different service address.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Launches the interactive classifier window.
    ///
    /// # Arguments
    /// * `initial_image` - Optional image file to pre-select on startup
    ///
    /// # Errors
    ///
    /// Returns an error if UI initialization fails.
    pub fn run_interactive(&self, initial_image: Option<PathBuf>) -> Result<()> {
        ui::run(self.config.clone(), initial_image)
    }

    /// Looks up a recorded classification result without any UI.
    ///
    /// Useful for headless operation and scripting.
    ///
    /// # Arguments
    /// * `base_name` - Image file name with its extension already stripped
    /// * `shots` - Few-shot configuration to look up
    pub async fn lookup(&self, base_name: &str, shots: ShotCount) -> Result<PredictionResult> {
        let client = PredictionClient::new(&self.config)?;
        client.fetch_prediction(base_name, shots).await
    }

    /// Returns a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup before using any other functions.
/// This loads `.env` files if present and sets up the environment.
pub fn init() {
    let _ = dotenvy::dotenv();
}
