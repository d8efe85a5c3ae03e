use crate::error::Result;
use dotenvy::dotenv;
use std::env;

/// Default base address of the prediction service, matching the
/// development deployment of the classifier backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let base_url =
            env::var("SATVISION_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self { base_url })
    }

    /// Creates a configuration pointing at a specific service address,
    /// bypassing the environment. Used by the CLI override and tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}
