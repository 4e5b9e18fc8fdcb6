//! Settings structures for RagBridge-RS configuration

use crate::retry::RetrySchedule;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub outgoing: OutgoingSettings,
    pub retry: RetrySettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Build settings from defaults plus environment variables
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.merge_env();
        settings
    }

    /// Merge with environment variables (RAG_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("RAG_API_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("RAG_API_KEY") {
            self.api.api_key = val;
        }
    }

    /// Check that the configured base URL is well-formed
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api.base_url)
            .map_err(|e| anyhow::anyhow!("invalid base URL '{}': {}", self.api.base_url, e))?;
        Ok(())
    }
}

/// Remote knowledge-base API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the knowledge-base API
    pub base_url: String,
    /// Bearer token sent with every request
    pub api_key: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: String::new(),
        }
    }
}

impl ApiSettings {
    /// Join a path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Connect timeout in seconds
    pub connect_timeout: f64,
    /// Read timeout for search and document requests in seconds
    pub read_timeout: f64,
    /// Read timeout for collection listing in seconds
    pub list_timeout: f64,
    /// Verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            connect_timeout: 10.0,
            read_timeout: 30.0,
            list_timeout: 10.0,
            verify_ssl: true,
        }
    }
}

impl OutgoingSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.connect_timeout)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.read_timeout)
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.list_timeout)
    }
}

/// Retry settings for the search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Backoff delays in seconds; one attempt per entry
    pub delays: Vec<f64>,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            delays: vec![1.0, 2.0, 4.0],
        }
    }
}

impl RetrySettings {
    /// Build the schedule used by the retry loop
    pub fn schedule(&self) -> RetrySchedule {
        RetrySchedule::new(self.delays.iter().map(|&s| Duration::from_secs_f64(s)).collect())
    }
}
