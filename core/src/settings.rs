//! Settings profile selection.
//!
//! Authenticated users keep their settings in the remote profile.
//! Anonymous users get the same payload shape from a local key-value store.
//! Which backend a save goes to is decided by the `is_authenticated` flag of
//! the last loaded snapshot.

use crate::error::Result;
use crate::protocol::{AnagramSettings, ProfileSnapshot, ProfileStore};
use crate::store::LocalProfileStore;
use tracing::{debug, warn};

pub struct SettingsManager {
    remote: Option<Box<dyn ProfileStore>>,
    local: LocalProfileStore,
    snapshot: Option<ProfileSnapshot>,
}

impl SettingsManager {
    pub fn new(remote: Box<dyn ProfileStore>, local: LocalProfileStore) -> Self {
        Self {
            remote: Some(remote),
            local,
            snapshot: None,
        }
    }

    /// Manager without a remote profile; every session is anonymous.
    pub fn local_only(local: LocalProfileStore) -> Self {
        Self {
            remote: None,
            local,
            snapshot: None,
        }
    }

    /// Last successfully loaded (or saved) profile.
    pub fn snapshot(&self) -> Option<&ProfileSnapshot> {
        self.snapshot.as_ref()
    }

    /// Current settings, falling back to defaults before the first load.
    pub fn settings(&self) -> AnagramSettings {
        self.snapshot
            .as_ref()
            .map(|s| s.settings.clone())
            .unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.is_authenticated)
    }

    /// Load the profile. Anonymous snapshots are overlaid with locally
    /// stored settings. On failure the cached snapshot is kept.
    pub fn load(&mut self, language_tag: &str) -> Result<&ProfileSnapshot> {
        let mut snap = match &self.remote {
            Some(remote) => remote.load(language_tag)?,
            None => self.local.load(language_tag)?,
        };
        if !snap.is_authenticated {
            match self.local.stored() {
                Ok(Some(local)) => snap.settings = local,
                Ok(None) => {}
                Err(e) => warn!("ignoring unreadable local settings: {e}"),
            }
        }
        debug!(
            authenticated = snap.is_authenticated,
            corpus = %snap.settings.corpus_key,
            "profile loaded"
        );
        let snap = self.snapshot.insert(snap);
        Ok(&*snap)
    }

    /// Validate and store `settings` in the backend matching the session.
    pub fn save(&mut self, settings: AnagramSettings) -> Result<&AnagramSettings> {
        settings.validate()?;
        let stored = match self.remote.as_mut() {
            Some(remote) if self.snapshot.as_ref().is_some_and(|s| s.is_authenticated) => {
                remote.save(&settings)?
            }
            _ => self.local.save(&settings)?,
        };
        let snap = self
            .snapshot
            .get_or_insert_with(|| ProfileSnapshot::anonymous(AnagramSettings::default()));
        snap.settings = stored;
        Ok(&snap.settings)
    }
}
