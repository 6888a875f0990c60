//! anagram-client crate root
//!
//! HTTP+JSON implementations of the collaborators `anagram-core` talks to
//! (composition store, hint service, settings profile) and factory
//! functions that wire either the remote or the local backends.
//!
//! Public API exported here:
//! - `ClientConfig` from `config`
//! - `HttpClient` from `http`
//! - `HttpHintService`, `HttpCompositionStore`, `HttpProfileStore`
//! - `Backends` with `online_backends` / `offline_backends`
//! - `Repl` and `Command` from `repl`, driven by the `anagram` binary

pub mod config;
pub mod hints;
pub mod http;
pub mod profile;
pub mod repl;
pub mod saver;

pub use anagram_core::{
    Composer, CompositionSession, CompositionStore, Config, HintService, KeyEvent, KeyResult,
    SettingsManager,
};

pub use config::ClientConfig;
pub use hints::HttpHintService;
pub use http::HttpClient;
pub use profile::HttpProfileStore;
pub use repl::{Command, Repl};
pub use saver::HttpCompositionStore;

use anagram_core::{LocalProfileStore, RedbStore, Result};

/// Collaborators a front end hands to the session.
pub struct Backends {
    pub store: Box<dyn CompositionStore>,
    /// `None` when no hint service is reachable (offline)
    pub hints: Option<Box<dyn HintService>>,
    pub settings: SettingsManager,
}

/// Remote store, hints and profile; anonymous settings still go to the
/// local profile under `data_dir`.
pub fn online_backends(config: &ClientConfig) -> Result<Backends> {
    let http = HttpClient::new(config)?;
    let local = LocalProfileStore::open(config.base.profile_path())?;
    Ok(Backends {
        store: Box::new(HttpCompositionStore::new(http.clone())),
        hints: Some(Box::new(HttpHintService::new(http.clone()))),
        settings: SettingsManager::new(Box::new(HttpProfileStore::new(http)), local),
    })
}

/// Everything local: `redb` store and profile under `data_dir`, no hints.
pub fn offline_backends(config: &Config) -> Result<Backends> {
    Ok(Backends {
        store: Box::new(RedbStore::open(config.store_path())?),
        hints: None,
        settings: SettingsManager::local_only(LocalProfileStore::open(config.profile_path())?),
    })
}
