// Named-preset persistence over the remote config API
//
// Wire contract: GET/POST /api/preset/{name} with body
// { "streams": [{ "name": "...", "url": "..." }, ...] }. No auth, no retries;
// failures are logged and surfaced to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::MultiviewError;

/// Default preset API origin; override with MULTIVIEW_API_BASE.
const DEFAULT_API_BASE: &str = "http://127.0.0.1:5030";

/// One stream assignment as carried on the preset wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetPayload {
    pub streams: Vec<PresetEntry>,
}

/// Backend for named-preset storage.
#[async_trait]
pub trait PresetStore: Send + Sync {
    /// Name of the store (for logging)
    fn name(&self) -> &'static str;

    async fn load(&self, preset: &str) -> Result<Vec<PresetEntry>, MultiviewError>;

    async fn save(&self, preset: &str, streams: Vec<PresetEntry>) -> Result<(), MultiviewError>;
}

/// HTTP store talking to the multiview config API.
pub struct HttpPresetStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPresetStore {
    pub fn new() -> Self {
        let base_url =
            std::env::var("MULTIVIEW_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, preset: &str) -> String {
        format!("{}/api/preset/{}", self.base_url.trim_end_matches('/'), preset)
    }
}

impl Default for HttpPresetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresetStore for HttpPresetStore {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn load(&self, preset: &str) -> Result<Vec<PresetEntry>, MultiviewError> {
        let endpoint = self.endpoint(preset);
        eprintln!("[Preset] Loading '{}' from {}", preset, endpoint);

        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| MultiviewError::PresetHttp(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MultiviewError::PresetHttp(format!(
                "GET {} returned {}",
                endpoint,
                response.status()
            )));
        }

        let payload: PresetPayload = response
            .json()
            .await
            .map_err(|e| MultiviewError::PresetDecode(e.to_string()))?;

        eprintln!("[Preset] Loaded {} stream(s) from '{}'", payload.streams.len(), preset);
        Ok(payload.streams)
    }

    async fn save(&self, preset: &str, streams: Vec<PresetEntry>) -> Result<(), MultiviewError> {
        let endpoint = self.endpoint(preset);
        eprintln!("[Preset] Saving {} stream(s) to '{}'", streams.len(), preset);

        let response = self
            .client
            .post(&endpoint)
            .json(&PresetPayload { streams })
            .send()
            .await
            .map_err(|e| MultiviewError::PresetHttp(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MultiviewError::PresetHttp(format!(
                "POST {} returned {}",
                endpoint,
                response.status()
            )));
        }

        Ok(())
    }
}
