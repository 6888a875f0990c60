//! Composition session.
//!
//! `CompositionSession` owns everything that changes while the user works:
//! the reference pool, the consumption set of the word being typed, the list
//! of committed compositions, the persisted list shown to the user and the
//! latest hint panel. It is a two-state machine:
//!
//! ```text
//! NoReference --set_reference--> ReferenceSet --clear_reference--> NoReference
//! ```
//!
//! Calls that make no sense in the current state are silent no-ops, so a
//! misordered UI event never breaks the session.
//!
//! Collaborators are passed in per call. Each reference change bumps a
//! generation counter; hint responses issued under an older generation are
//! discarded instead of being shown against the wrong letters.

use crate::composition::SavedComposition;
use crate::error::{CollaboratorError, Result};
use crate::pool::{ConsumptionSet, ReferencePool};
use crate::protocol::{
    CompositionStore, DeleteRequest, HintRequest, HintResponse, HintService, PersistRequest,
    SavedEntry, Status,
};
use crate::reconcile::reconcile;
use crate::Config;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NoReference,
    ReferenceSet,
}

/// A hint request stamped with the generation it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintTicket {
    pub generation: u64,
    pub request: HintRequest,
}

/// Hints ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintPanel {
    pub leftover: String,
    pub hints: Vec<String>,
    pub result_count: u64,
    pub recursion_count: u64,
}

#[derive(Debug, Clone)]
pub struct CompositionSession {
    pool: Option<ReferencePool>,
    consumption: ConsumptionSet,
    candidate: String,
    /// Commit order; displayed newest first.
    saved: Vec<SavedComposition>,
    entries: Vec<SavedEntry>,
    hints: Option<HintPanel>,
    generation: u64,
    separator: String,
    max_reference_len: usize,
}

impl CompositionSession {
    /// Session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Session using the reference limit and separator from `config`.
    pub fn with_config(config: &Config) -> Self {
        Self {
            pool: None,
            consumption: ConsumptionSet::new(),
            candidate: String::new(),
            saved: Vec::new(),
            entries: Vec::new(),
            hints: None,
            generation: 0,
            separator: config.leftover_separator.clone(),
            max_reference_len: config.max_reference_len,
        }
    }

    /// Whether a reference is set.
    pub fn state(&self) -> SessionState {
        if self.pool.is_some() {
            SessionState::ReferenceSet
        } else {
            SessionState::NoReference
        }
    }

    /// The reference phrase, as stored after trimming.
    pub fn reference(&self) -> Option<&str> {
        self.pool.as_ref().map(|p| p.text())
    }

    /// Pool of the current reference.
    pub fn pool(&self) -> Option<&ReferencePool> {
        self.pool.as_ref()
    }

    /// Pool indices used by the pending candidate.
    pub fn consumption(&self) -> &ConsumptionSet {
        &self.consumption
    }

    /// The last accepted (reconciled) candidate.
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    /// Bumped on every reference change; stamps hint tickets.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the reference phrase. Blank input is ignored.
    ///
    /// Surrounding whitespace is trimmed; references longer than the
    /// configured limit are cut at that many characters.
    pub fn set_reference(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let reference: String = if trimmed.chars().count() > self.max_reference_len {
            warn!(
                limit = self.max_reference_len,
                "reference phrase truncated"
            );
            trimmed.chars().take(self.max_reference_len).collect()
        } else {
            trimmed.to_string()
        };

        self.pool = Some(ReferencePool::new(&reference));
        self.reset_pending();
        self.hints = None;
        self.generation += 1;
        info!(len = reference.chars().count(), generation = self.generation, "reference set");
        true
    }

    /// Drop the reference and the pending candidate.
    pub fn clear_reference(&mut self) {
        if self.pool.take().is_none() {
            return;
        }
        self.reset_pending();
        self.hints = None;
        self.generation += 1;
        info!(generation = self.generation, "reference cleared");
    }

    fn reset_pending(&mut self) {
        self.candidate.clear();
        self.consumption.clear();
    }

    /// Reconcile `candidate` against the pool and adopt the result.
    ///
    /// Returns the corrected string, or `None` when no reference is set.
    pub fn edit(&mut self, candidate: &str) -> Option<&str> {
        let pool = self.pool.as_ref()?;
        let result = reconcile(pool, candidate);
        if result.accepted.len() != candidate.len() {
            debug!(
                dropped = result.dropped_from(candidate),
                "unavailable characters dropped"
            );
        }
        self.candidate = result.accepted;
        self.consumption = result.consumption;
        Some(&self.candidate)
    }

    /// Pool characters not consumed by the pending candidate.
    pub fn leftover(&self) -> Vec<char> {
        self.pool
            .as_ref()
            .map(|p| p.leftover(&self.consumption))
            .unwrap_or_default()
    }

    /// Leftover characters as one string.
    pub fn leftover_string(&self) -> String {
        self.leftover().into_iter().collect()
    }

    /// Commit `word` as a composition of the current reference.
    ///
    /// The word is reconciled first, so only what the pool supports is
    /// saved. Blank words are ignored. The pending candidate and consumption
    /// are reset; the reference stays.
    pub fn commit(&mut self, word: &str) -> Option<&SavedComposition> {
        let pool = self.pool.as_ref()?;
        if word.trim().is_empty() {
            return None;
        }
        let result = reconcile(pool, word.trim());
        let accepted = result.accepted.trim();
        if accepted.is_empty() {
            return None;
        }
        let saved = SavedComposition::new(
            pool.text(),
            accepted,
            pool.leftover(&result.consumption),
        );
        debug!(word = %saved.word, leftover = saved.leftover.len(), "composition committed");
        self.saved.push(saved);
        self.reset_pending();
        self.saved.last()
    }

    /// Commit the pending candidate.
    pub fn commit_pending(&mut self) -> Option<&SavedComposition> {
        let word = self.candidate.clone();
        self.commit(&word)
    }

    /// Saved compositions, most recent first.
    pub fn saved(&self) -> impl Iterator<Item = &SavedComposition> {
        self.saved.iter().rev()
    }

    /// Number of saved, not yet persisted, compositions.
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    /// Display lines of the saved list, most recent first.
    pub fn saved_lines(&self) -> Vec<String> {
        self.saved()
            .map(|c| c.display_line(&self.separator))
            .collect()
    }

    /// Persist requests for the saved list, one per reference phrase, in
    /// the order the phrases were first used.
    pub fn persist_requests(&self) -> Vec<PersistRequest> {
        let mut models: Vec<&str> = Vec::new();
        for c in &self.saved {
            if !models.contains(&c.reference_text.as_str()) {
                models.push(&c.reference_text);
            }
        }
        models
            .into_iter()
            .map(|model| PersistRequest {
                model: model.to_string(),
                anagrams: self
                    .saved()
                    .filter(|c| c.reference_text == model)
                    .map(|c| c.display_line(&self.separator))
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .collect()
    }

    /// Hand the saved list to `store`.
    ///
    /// Groups the store accepted leave the local list; on the first failure
    /// the remaining compositions stay and the error is returned. Returns
    /// the number of compositions handed over.
    pub fn persist(&mut self, store: &mut dyn CompositionStore) -> Result<usize> {
        let mut handed = 0;
        for request in self.persist_requests() {
            if let Err(e) = store.persist(&request) {
                warn!(model = %request.model, "persist failed: {e}");
                return Err(e);
            }
            let before = self.saved.len();
            self.saved.retain(|c| c.reference_text != request.model);
            handed += before - self.saved.len();
            info!(model = %request.model, "compositions persisted");
        }
        Ok(handed)
    }

    /// Persisted entries as last listed, newest first.
    pub fn entries(&self) -> &[SavedEntry] {
        &self.entries
    }

    /// Reload the persisted entries from `store`.
    pub fn refresh_entries(&mut self, store: &dyn CompositionStore) -> Result<&[SavedEntry]> {
        self.entries = store.list()?;
        Ok(&self.entries)
    }

    /// Delete a persisted entry. It leaves the displayed list only once the
    /// store confirms.
    pub fn delete_entry(&mut self, store: &mut dyn CompositionStore, id: u64) -> Result<()> {
        store.delete(DeleteRequest { id })?;
        self.entries.retain(|e| e.id != id);
        debug!(id, "persisted entry deleted");
        Ok(())
    }

    /// Build a hint request for the current leftover letters.
    ///
    /// `None` when no reference is set or nothing is left over.
    pub fn hint_request(&self, language_tag: &str) -> Option<HintTicket> {
        self.pool.as_ref()?;
        let leftover = self.leftover_string();
        if leftover.is_empty() {
            return None;
        }
        Some(HintTicket {
            generation: self.generation,
            request: HintRequest {
                language_tag: language_tag.to_string(),
                leftover_chars: leftover,
            },
        })
    }

    /// Apply a hint response. Returns false when it was discarded because
    /// the reference changed since the ticket was issued.
    pub fn apply_hints(&mut self, ticket: &HintTicket, response: HintResponse) -> Result<bool> {
        if ticket.generation != self.generation {
            debug!(
                issued = ticket.generation,
                current = self.generation,
                "discarding stale hint response"
            );
            return Ok(false);
        }
        if response.status == Status::Error {
            return Err(CollaboratorError::rejected(
                response
                    .message
                    .unwrap_or_else(|| "hint service error".to_string()),
            ));
        }
        self.hints = Some(HintPanel {
            leftover: ticket.request.leftover_chars.clone(),
            hints: response.hints,
            result_count: response.result_count,
            recursion_count: response.recursion_count,
        });
        Ok(true)
    }

    /// Ask `service` for hints on the leftover letters.
    ///
    /// The service is not called when nothing is left over. On failure the
    /// previous panel stays.
    pub fn fetch_hints(
        &mut self,
        service: &dyn HintService,
        language_tag: &str,
    ) -> Result<Option<&HintPanel>> {
        let Some(ticket) = self.hint_request(language_tag) else {
            debug!("no leftover characters, hint service not called");
            return Ok(None);
        };
        let response = service.fetch(&ticket.request)?;
        if self.apply_hints(&ticket, response)? {
            Ok(self.hints.as_ref())
        } else {
            Ok(None)
        }
    }

    /// Hint panel for the current reference, if fetched.
    pub fn hints(&self) -> Option<&HintPanel> {
        self.hints.as_ref()
    }
}

impl Default for CompositionSession {
    fn default() -> Self {
        Self::new()
    }
}
