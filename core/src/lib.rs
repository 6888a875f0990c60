//! anagram-core
//!
//! Composing words from the letters of a reference phrase. Each reference
//! letter can be used once; spaces and common punctuation are free. On every
//! edit the typed string is rebuilt against the pool of reference letters,
//! keeping what the pool supports and dropping the rest.
//!
//! Public API:
//! - `normalize` / `NormKey` - case and diacritic insensitive comparison keys
//! - `is_free` - characters that never consume a reference letter
//! - `ReferencePool` / `ConsumptionSet` - reference letters and which are used
//! - `reconcile` - the per-edit rebuild of a candidate against the pool
//! - `CompositionSession` - reference lifecycle, edits, commits, collaborators
//! - `Composer` - key-event front end over a session with cursor tracking
//! - `protocol` - collaborator payloads and the store / hint / profile traits
//! - `store` - in-memory and `redb` backed local collaborators
//! - `SettingsManager` - remote vs local settings profile selection
//! - `Config` - TOML configuration
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod normalize;
pub use normalize::{equivalent, normalize, NormKey};

pub mod free_chars;
pub use free_chars::is_free;

pub mod pool;
pub use pool::{ConsumptionSet, PoolEntry, ReferencePool};

pub mod reconcile;
pub use reconcile::{reconcile, remap_cursor, Reconciliation};

pub mod composition;
pub use composition::SavedComposition;

pub mod error;
pub use error::{CollaboratorError, Result};

pub mod protocol;
pub use protocol::{
    AnagramSettings, CompositionStore, CorpusOption, DeleteRequest, HintRequest, HintResponse,
    HintService, PersistRequest, ProfileSnapshot, ProfileStore, SavedEntry, SavedListResponse,
    SettingsSaveResponse, Status, StatusResponse,
};

pub mod store;
pub use store::{InMemoryStore, LocalProfileStore, RedbStore};

pub mod settings;
pub use settings::SettingsManager;

pub mod session;
pub use session::{CompositionSession, HintPanel, HintTicket, SessionState};

pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod view;
pub use view::{ComposerView, ReferenceGlyph};

pub mod composer;
pub use composer::{Composer, KeyEvent, KeyResult};

/// Language-agnostic configuration shared by the core and front ends.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Language tag sent with hint requests ("it", "en", ...)
    pub language_tag: String,

    /// Directory holding the local `redb` stores
    pub data_dir: PathBuf,

    /// Longest accepted reference phrase, in characters
    pub max_reference_len: usize,

    /// Separator between leftover letters in saved-list lines
    pub leftover_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language_tag: "it".to_string(),
            data_dir: PathBuf::from(".anagram"),
            max_reference_len: 256,
            leftover_separator: " ".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Path of the saved-compositions database.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("compositions.redb")
    }

    /// Path of the anonymous settings database.
    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join("profile.redb")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.language_tag, "it");
        assert_eq!(cfg.max_reference_len, 256);
        assert!(cfg.store_path().ends_with("compositions.redb"));
    }

    #[test]
    fn config_partial_toml_uses_defaults() {
        let cfg = Config::from_toml_str("language_tag = \"en\"\n").unwrap();
        assert_eq!(cfg.language_tag, "en");
        assert_eq!(cfg.leftover_separator, " ");
    }

    #[test]
    fn config_toml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anagram.toml");
        let cfg = Config {
            max_reference_len: 64,
            ..Config::default()
        };
        cfg.save_toml(&path).unwrap();
        assert_eq!(Config::load_toml(&path).unwrap(), cfg);
    }
}
