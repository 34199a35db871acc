use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Retries of failed reads, writes are never retried.
    pub max_retries: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".into(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}
