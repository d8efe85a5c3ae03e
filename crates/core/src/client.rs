use crate::config::Config;
use crate::error::{AppError, Result};
use crate::prediction::{PredictionResult, ShotCount};
use tracing::{debug, warn};

/// HTTP client for the prediction lookup service.
pub struct PredictionClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Validate the base URL up front so a bad configuration fails at
        // construction rather than on the first lookup
        url::Url::parse(&config.base_url)
            .map_err(|e| AppError::config(format!("Invalid base URL: {}", e)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Looks up the recorded classification result for a base filename.
    ///
    /// Exactly one GET, no retries; the caller is the only retry mechanism.
    pub async fn fetch_prediction(
        &self,
        base_name: &str,
        shots: ShotCount,
    ) -> Result<PredictionResult> {
        let mut endpoint = url::Url::parse(&format!("{}/get_prediction", self.base_url))
            .map_err(|e| AppError::config(format!("Invalid endpoint URL: {}", e)))?;
        endpoint
            .query_pairs_mut()
            .append_pair("filename", base_name)
            .append_pair("shots", &shots.to_string());

        debug!(%endpoint, "requesting prediction");

        let response = self.http.get(endpoint).send().await.map_err(|e| {
            warn!("prediction request failed: {}", e);
            AppError::lookup(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, filename = base_name, "no prediction record");
            return Err(AppError::lookup(format!(
                "Service returned status {}",
                status
            )));
        }

        response
            .json::<PredictionResult>()
            .await
            .map_err(|e| AppError::parse(format!("Unexpected response shape: {}", e)))
    }
}
