//! Client configuration that extends the base `Config` from core.
//!
//! The base fields (language tag, data directory, ...) are flattened so one
//! TOML file configures both crates:
//!
//! ```toml
//! language_tag = "en"
//! base_url = "https://anagrams.example.org/"
//! timeout_ms = 3000
//! ```

use anagram_core::Config;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(flatten)]
    pub base: Config,

    /// Root of the web service; endpoint paths are joined onto it
    pub base_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Sent as `X-CSRFToken` on every request when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base: Config::default(),
            base_url: "http://127.0.0.1:8000/".to_string(),
            timeout_ms: 5000,
            csrf_token: None,
        }
    }
}

impl ClientConfig {
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn base(&self) -> &Config {
        &self.base
    }

    pub fn into_base(self) -> Config {
        self.base
    }
}
