//! Collaborator contracts: request/response payloads and service traits.
//!
//! The session never talks to a transport directly. Persistence, hint
//! lookup and the settings profile are reached through the traits below;
//! `anagram-client` implements them over HTTP+JSON and [`crate::store`]
//! provides local backends.

use crate::error::{CollaboratorError, Result};
use serde::{Deserialize, Serialize};

/// Outcome flag carried by every collaborator response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Generic `{status, message?}` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: Status::Success,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
        }
    }

    /// Turn an `error` status into [`CollaboratorError::Rejected`].
    pub fn into_result(self) -> Result<()> {
        match self.status {
            Status::Success => Ok(()),
            Status::Error => Err(CollaboratorError::rejected(
                self.message.unwrap_or_else(|| "unspecified error".to_string()),
            )),
        }
    }
}

/// Save the session's compositions for one reference phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistRequest {
    /// Reference phrase.
    pub model: String,
    /// Display lines of the saved compositions, newline separated.
    pub anagrams: String,
}

impl PersistRequest {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.anagrams.lines()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: u64,
}

/// A persisted group of compositions as listed back by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEntry {
    pub id: u64,
    pub model: String,
    #[serde(default)]
    pub anagrams: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRequest {
    pub language_tag: String,
    pub leftover_chars: String,
}

/// Hint service answer. A `success` body must carry `hints_html`; error
/// bodies may omit everything but `status` and `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHintResponse")]
pub struct HintResponse {
    pub status: Status,
    #[serde(rename = "hints_html")]
    pub hints: Vec<String>,
    #[serde(rename = "n_results")]
    pub result_count: u64,
    #[serde(rename = "recursions")]
    pub recursion_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct RawHintResponse {
    status: Status,
    hints_html: Option<Vec<String>>,
    #[serde(default)]
    n_results: u64,
    #[serde(default)]
    recursions: u64,
    #[serde(default)]
    message: Option<String>,
}

impl TryFrom<RawHintResponse> for HintResponse {
    type Error = String;

    fn try_from(raw: RawHintResponse) -> std::result::Result<Self, Self::Error> {
        let hints = match (raw.status, raw.hints_html) {
            (_, Some(hints)) => hints,
            (Status::Error, None) => Vec::new(),
            (Status::Success, None) => return Err("success response without hints_html".into()),
        };
        Ok(Self {
            status: raw.status,
            hints,
            result_count: raw.n_results,
            recursion_count: raw.recursions,
            message: raw.message,
        })
    }
}

/// Per-user knobs for the external hint generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnagramSettings {
    /// Corpus within the selected language (e.g. "660000_parole_italiane").
    pub corpus_key: String,
    pub min_word_length: u32,
    pub max_word_length: u32,
    pub max_results: u32,
    pub prioritize_long_words: bool,
}

impl Default for AnagramSettings {
    fn default() -> Self {
        Self {
            corpus_key: "660000_parole_italiane".to_string(),
            min_word_length: 2,
            max_word_length: 20,
            max_results: 500,
            prioritize_long_words: true,
        }
    }
}

impl AnagramSettings {
    pub fn validate(&self) -> Result<()> {
        if self.corpus_key.trim().is_empty() {
            return Err(CollaboratorError::Invalid("corpus_key is empty".into()));
        }
        if self.min_word_length == 0 {
            return Err(CollaboratorError::Invalid(
                "min_word_length must be at least 1".into(),
            ));
        }
        if self.min_word_length > self.max_word_length {
            return Err(CollaboratorError::Invalid(format!(
                "min_word_length {} exceeds max_word_length {}",
                self.min_word_length, self.max_word_length
            )));
        }
        if self.max_results == 0 {
            return Err(CollaboratorError::Invalid(
                "max_results must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusOption {
    pub key: String,
    pub label: String,
}

/// What `ProfileStore::load` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(rename = "corpusOptions", default)]
    pub corpus_options: Vec<CorpusOption>,
    #[serde(flatten)]
    pub settings: AnagramSettings,
    #[serde(rename = "isAuthenticated", default)]
    pub is_authenticated: bool,
}

impl ProfileSnapshot {
    pub fn anonymous(settings: AnagramSettings) -> Self {
        Self {
            corpus_options: Vec::new(),
            settings,
            is_authenticated: false,
        }
    }
}

/// Answer to a settings save: `{status, settings}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSaveResponse {
    pub status: Status,
    #[serde(default)]
    pub settings: Option<AnagramSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Answer to a saved-list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedListResponse {
    pub status: Status,
    #[serde(default)]
    pub anagrams: Vec<SavedEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Backend store for committed compositions.
pub trait CompositionStore {
    fn persist(&mut self, request: &PersistRequest) -> Result<()>;
    fn delete(&mut self, request: DeleteRequest) -> Result<()>;
    /// Persisted entries, newest first.
    fn list(&self) -> Result<Vec<SavedEntry>>;
}

/// External hint generator. Never called with empty leftover.
pub trait HintService {
    fn fetch(&self, request: &HintRequest) -> Result<HintResponse>;
}

/// Settings profile backend.
pub trait ProfileStore {
    fn load(&self, language_tag: &str) -> Result<ProfileSnapshot>;
    /// Store `settings`, returning what the backend now holds.
    fn save(&mut self, settings: &AnagramSettings) -> Result<AnagramSettings>;
}
