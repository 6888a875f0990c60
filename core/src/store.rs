//! Local collaborator backends.
//!
//! - `InMemoryStore`: saved compositions kept in a `Vec`, for tests and
//!   offline sessions that do not need to survive a restart.
//! - `RedbStore`: saved compositions persisted in a `redb` database, one row
//!   per persisted group keyed by a monotonically increasing id.
//! - `LocalProfileStore`: the anonymous settings backend. It keeps the
//!   settings payload as JSON under one fixed key, the same shape the
//!   remote profile would hold.

use crate::error::{CollaboratorError, Result};
use crate::protocol::{
    AnagramSettings, CompositionStore, DeleteRequest, PersistRequest, ProfileSnapshot,
    ProfileStore, SavedEntry,
};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key under which anonymous settings are stored.
pub const LOCAL_SETTINGS_KEY: &str = "anagram_settings";

fn is_blank(req: &PersistRequest) -> bool {
    req.model.trim().is_empty() || req.anagrams.trim().is_empty()
}

/// Create the directory a database file will live in.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CollaboratorError::Storage(redb::Error::Io(e)))?;
    }
    Ok(())
}

fn missing(id: u64) -> CollaboratorError {
    CollaboratorError::rejected(format!("no saved entry with id {id}"))
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Vec<SavedEntry>,
    next_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CompositionStore for InMemoryStore {
    fn persist(&mut self, request: &PersistRequest) -> Result<()> {
        if is_blank(request) {
            debug!("skipping blank persist request");
            return Ok(());
        }
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.entries.push(SavedEntry {
            id,
            model: request.model.clone(),
            anagrams: request.anagrams.clone(),
        });
        Ok(())
    }

    fn delete(&mut self, request: DeleteRequest) -> Result<()> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == request.id)
            .ok_or_else(|| missing(request.id))?;
        self.entries.remove(pos);
        Ok(())
    }

    fn list(&self) -> Result<Vec<SavedEntry>> {
        Ok(self.entries.iter().rev().cloned().collect())
    }
}

/// Saved compositions persisted with `redb`.
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl RedbStore {
    /// Rows are JSON-encoded `SavedEntry` values keyed by id.
    const TABLE_DEF: TableDefinition<'static, u64, &'static str> =
        TableDefinition::new("saved_compositions");

    /// Create or open the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        ensure_parent(path.as_ref())?;
        let db = Database::create(path.as_ref())?;
        // Make sure the table exists so read transactions can open it.
        let txn = db.begin_write()?;
        txn.open_table(Self::TABLE_DEF)?;
        txn.commit()?;
        Ok(Self {
            db,
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CompositionStore for RedbStore {
    fn persist(&mut self, request: &PersistRequest) -> Result<()> {
        if is_blank(request) {
            debug!("skipping blank persist request");
            return Ok(());
        }
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(Self::TABLE_DEF)?;
            let id = match table.last()? {
                Some((k, _)) => k.value() + 1,
                None => 1,
            };
            let row = serde_json::to_string(&SavedEntry {
                id,
                model: request.model.clone(),
                anagrams: request.anagrams.clone(),
            })?;
            table.insert(id, row.as_str())?;
            debug!(id, path = %self.path.display(), "persisted compositions");
        }
        txn.commit()?;
        Ok(())
    }

    fn delete(&mut self, request: DeleteRequest) -> Result<()> {
        let txn = self.db.begin_write()?;
        let removed = txn.open_table(Self::TABLE_DEF)?.remove(request.id)?.is_some();
        if !removed {
            txn.abort()?;
            return Err(missing(request.id));
        }
        txn.commit()?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<SavedEntry>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(Self::TABLE_DEF)?;
        let mut out = Vec::new();
        for item in table.iter()?.rev() {
            let (_, v) = item?;
            out.push(serde_json::from_str::<SavedEntry>(v.value())?);
        }
        Ok(out)
    }
}

/// Settings backend for anonymous sessions.
pub struct LocalProfileStore {
    db: Database,
}

impl LocalProfileStore {
    const TABLE_DEF: TableDefinition<'static, &'static str, &'static str> =
        TableDefinition::new("profile");

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        ensure_parent(path.as_ref())?;
        let db = Database::create(path.as_ref())?;
        let txn = db.begin_write()?;
        txn.open_table(Self::TABLE_DEF)?;
        txn.commit()?;
        Ok(Self { db })
    }

    /// Settings stored under [`LOCAL_SETTINGS_KEY`], if any.
    pub fn stored(&self) -> Result<Option<AnagramSettings>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(Self::TABLE_DEF)?;
        match table.get(LOCAL_SETTINGS_KEY)? {
            Some(v) => Ok(Some(serde_json::from_str(v.value())?)),
            None => Ok(None),
        }
    }
}

impl ProfileStore for LocalProfileStore {
    fn load(&self, _language_tag: &str) -> Result<ProfileSnapshot> {
        Ok(ProfileSnapshot::anonymous(self.stored()?.unwrap_or_default()))
    }

    fn save(&mut self, settings: &AnagramSettings) -> Result<AnagramSettings> {
        settings.validate()?;
        let json = serde_json::to_string(settings)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(Self::TABLE_DEF)?;
            table.insert(LOCAL_SETTINGS_KEY, json.as_str())?;
        }
        txn.commit()?;
        Ok(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(model: &str, anagrams: &str) -> PersistRequest {
        PersistRequest {
            model: model.into(),
            anagrams: anagrams.into(),
        }
    }

    #[test]
    fn in_memory_persist_list_delete() {
        let mut store = InMemoryStore::new();
        store.persist(&req("roma", "amor")).unwrap();
        store.persist(&req("roma", "ramo\nora m")).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, 2);
        assert_eq!(listed[1].anagrams, "amor");

        store.delete(DeleteRequest { id: 1 }).unwrap();
        assert_eq!(store.len(), 1);
        assert!(matches!(
            store.delete(DeleteRequest { id: 1 }),
            Err(CollaboratorError::Rejected { .. })
        ));
    }

    #[test]
    fn in_memory_blank_request_is_skipped() {
        let mut store = InMemoryStore::new();
        store.persist(&req("roma", "  ")).unwrap();
        store.persist(&req("", "amor")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn redb_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.redb");
        {
            let mut store = RedbStore::open(&path).unwrap();
            assert!(store.list().unwrap().is_empty());
            store.persist(&req("café", "face")).unwrap();
            store.persist(&req("café", "fé ca")).unwrap();
        }

        // reopen and continue numbering
        let mut store = RedbStore::open(&path).unwrap();
        store.persist(&req("roma", "amor")).unwrap();
        let ids: Vec<u64> = store.list().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        store.delete(DeleteRequest { id: 2 }).unwrap();
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].model, "café");
        assert!(store.delete(DeleteRequest { id: 2 }).is_err());
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn open_reports_unusable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = RedbStore::open(blocker.join("data").join("saved.redb")).err().unwrap();
        assert!(matches!(err, CollaboratorError::Storage(redb::Error::Io(_))));
        let err = LocalProfileStore::open(blocker.join("profile.redb")).err().unwrap();
        assert!(matches!(err, CollaboratorError::Storage(redb::Error::Io(_))));
    }

    #[test]
    fn local_profile_defaults_then_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut profile = LocalProfileStore::open(dir.path().join("profile.redb")).unwrap();

        let snap = profile.load("it").unwrap();
        assert!(!snap.is_authenticated);
        assert_eq!(snap.settings, AnagramSettings::default());
        assert!(profile.stored().unwrap().is_none());

        let mut s = AnagramSettings::default();
        s.max_results = 42;
        profile.save(&s).unwrap();
        assert_eq!(profile.load("en").unwrap().settings.max_results, 42);
    }

    #[test]
    fn local_profile_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let mut profile = LocalProfileStore::open(dir.path().join("profile.redb")).unwrap();
        let mut s = AnagramSettings::default();
        s.min_word_length = 0;
        assert!(profile.save(&s).is_err());
        assert!(profile.stored().unwrap().is_none());
    }
}
