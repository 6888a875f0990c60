//! Key-event front end over a composition session.
//!
//! The `Composer` keeps an [`InputBuffer`] for the text bar and feeds the
//! whole buffer to [`CompositionSession::edit`] after every change, so
//! insertions and deletions in the middle of the text are reconciled the
//! same way as typing at the end. The cursor is moved to the end of the
//! reconciled prefix that was in front of it.
//!
//! Without a reference the text bar holds the reference phrase being typed;
//! `Enter` turns it into the reference. With a reference `Enter` commits the
//! current word and `Escape` drops the reference.

use crate::input_buffer::InputBuffer;
use crate::reconcile::remap_cursor;
use crate::session::{CompositionSession, SessionState};
use crate::view::{ComposerView, ReferenceGlyph};
use crate::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Char(char),
    /// Pasted text, inserted at the cursor in one edit
    Paste(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Handled,
    NotHandled,
}

#[derive(Debug, Clone, Default)]
pub struct Composer {
    session: CompositionSession,
    buffer: InputBuffer,
    view: ComposerView,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            session: CompositionSession::with_config(config),
            buffer: InputBuffer::new(),
            view: ComposerView::new(),
        }
    }

    pub fn view(&self) -> &ComposerView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ComposerView {
        &mut self.view
    }

    pub fn session(&self) -> &CompositionSession {
        &self.session
    }

    /// Session access for collaborator calls (persist, hints, ...).
    /// Call [`Composer::sync_view`] afterwards if the saved list changed.
    pub fn session_mut(&mut self) -> &mut CompositionSession {
        &mut self.session
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn process_key(&mut self, key: KeyEvent) -> KeyResult {
        self.view.committed = None;
        let result = match key {
            KeyEvent::Char(ch) => {
                self.buffer.insert_char(ch);
                self.reconcile_buffer();
                KeyResult::Handled
            }
            KeyEvent::Paste(text) => {
                if text.is_empty() {
                    KeyResult::NotHandled
                } else {
                    self.buffer.insert_str(&text);
                    self.reconcile_buffer();
                    KeyResult::Handled
                }
            }
            KeyEvent::Backspace => self.edited(|b| b.delete_before()),
            KeyEvent::Delete => self.edited(|b| b.delete_after()),
            KeyEvent::Left => handled(self.buffer.move_left()),
            KeyEvent::Right => handled(self.buffer.move_right()),
            KeyEvent::Home => {
                self.buffer.move_to_start();
                KeyResult::Handled
            }
            KeyEvent::End => {
                self.buffer.move_to_end();
                KeyResult::Handled
            }
            KeyEvent::Enter => self.handle_enter(),
            KeyEvent::Escape => self.handle_escape(),
        };
        self.sync_view();
        result
    }

    /// Replace the whole text bar, as when a field is set programmatically.
    /// The cursor goes to the end.
    pub fn set_text(&mut self, text: &str) {
        self.view.committed = None;
        self.buffer.replace(text, text.len());
        self.reconcile_buffer();
        self.sync_view();
    }

    fn edited(&mut self, op: impl FnOnce(&mut InputBuffer) -> bool) -> KeyResult {
        if op(&mut self.buffer) {
            self.reconcile_buffer();
            KeyResult::Handled
        } else {
            KeyResult::NotHandled
        }
    }

    fn handle_enter(&mut self) -> KeyResult {
        if self.buffer.text().trim().is_empty() {
            return KeyResult::NotHandled;
        }
        match self.session.state() {
            SessionState::ReferenceSet => {
                let word = self.buffer.text().to_string();
                let committed = self.session.commit(&word).map(|c| c.word.clone());
                if committed.is_none() {
                    return KeyResult::NotHandled;
                }
                self.view.committed = committed;
            }
            SessionState::NoReference => {
                let text = self.buffer.text().to_string();
                if !self.session.set_reference(&text) {
                    return KeyResult::NotHandled;
                }
            }
        }
        self.buffer.clear();
        KeyResult::Handled
    }

    fn handle_escape(&mut self) -> KeyResult {
        match self.session.state() {
            SessionState::ReferenceSet => {
                self.session.clear_reference();
                self.buffer.clear();
                KeyResult::Handled
            }
            SessionState::NoReference if !self.buffer.is_empty() => {
                self.buffer.clear();
                KeyResult::Handled
            }
            SessionState::NoReference => KeyResult::NotHandled,
        }
    }

    /// Run the whole buffer through the session and adopt the result.
    fn reconcile_buffer(&mut self) {
        let Some(pool) = self.session.pool() else {
            return;
        };
        let text = self.buffer.text().to_string();
        let cursor = remap_cursor(pool, &text, self.buffer.cursor());
        if let Some(accepted) = self.session.edit(&text) {
            self.buffer.replace(accepted, cursor);
        }
    }

    /// Rebuild the view from the session and buffer.
    pub fn sync_view(&mut self) {
        let consumption = self.session.consumption();
        self.view.state = self.session.state();
        self.view.text = self.buffer.text().to_string();
        self.view.cursor = self.buffer.cursor();
        self.view.reference = self
            .session
            .pool()
            .map(|pool| {
                pool.entries()
                    .iter()
                    .enumerate()
                    .map(|(i, e)| ReferenceGlyph {
                        ch: e.ch,
                        used: consumption.contains(i),
                    })
                    .collect()
            })
            .unwrap_or_default();
        self.view.leftover = self.session.leftover_string();
        self.view.saved_lines = self.session.saved_lines();
    }
}

fn handled(moved: bool) -> KeyResult {
    if moved {
        KeyResult::Handled
    } else {
        KeyResult::NotHandled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(c: &mut Composer, s: &str) {
        for ch in s.chars() {
            c.process_key(KeyEvent::Char(ch));
        }
    }

    #[test]
    fn test_enter_sets_reference_then_commits() {
        let mut c = Composer::new();
        type_str(&mut c, "Roma");
        assert_eq!(c.view().state, SessionState::NoReference);
        assert_eq!(c.process_key(KeyEvent::Enter), KeyResult::Handled);
        assert_eq!(c.view().state, SessionState::ReferenceSet);
        assert_eq!(c.view().text, "");
        assert_eq!(c.view().leftover, "Roma");

        type_str(&mut c, "amorx");
        assert_eq!(c.view().text, "amor");
        assert_eq!(c.view().used_count(), 4);

        assert_eq!(c.process_key(KeyEvent::Enter), KeyResult::Handled);
        assert_eq!(c.view_mut().take_committed(), Some("amor".to_string()));
        assert_eq!(c.view().saved_lines, vec!["amor".to_string()]);
        assert_eq!(c.view().used_count(), 0);
    }

    #[test]
    fn test_blank_enter_ignored() {
        let mut c = Composer::new();
        type_str(&mut c, "  ");
        assert_eq!(c.process_key(KeyEvent::Enter), KeyResult::NotHandled);
        assert_eq!(c.view().state, SessionState::NoReference);
    }

    #[test]
    fn test_middle_insert_is_reconciled() {
        let mut c = Composer::new();
        type_str(&mut c, "ab");
        c.process_key(KeyEvent::Enter);

        type_str(&mut c, "b");
        c.process_key(KeyEvent::Home);
        c.process_key(KeyEvent::Char('a'));
        assert_eq!(c.view().text, "ab");
        assert_eq!(c.view().cursor, 1);

        // a second 'a' in the middle has nothing left to consume
        c.process_key(KeyEvent::Char('a'));
        assert_eq!(c.view().text, "ab");
        assert_eq!(c.view().cursor, 1);
    }

    #[test]
    fn test_backspace_releases_letter() {
        let mut c = Composer::new();
        type_str(&mut c, "ab");
        c.process_key(KeyEvent::Enter);
        type_str(&mut c, "ab");
        assert_eq!(c.view().leftover, "");
        c.process_key(KeyEvent::Left);
        c.process_key(KeyEvent::Backspace);
        assert_eq!(c.view().text, "b");
        assert_eq!(c.view().leftover, "a");
        assert_eq!(c.view().marked_reference(), "a[b]");
    }

    #[test]
    fn test_paste_with_free_chars() {
        let mut c = Composer::new();
        type_str(&mut c, "ab");
        c.process_key(KeyEvent::Enter);
        c.process_key(KeyEvent::Paste("a a b!".into()));
        assert_eq!(c.view().text, "a  b!");
        assert_eq!(c.view().cursor, 5);
    }

    #[test]
    fn test_escape_clears_reference() {
        let mut c = Composer::new();
        type_str(&mut c, "ab");
        c.process_key(KeyEvent::Enter);
        type_str(&mut c, "a");
        assert_eq!(c.process_key(KeyEvent::Escape), KeyResult::Handled);
        assert_eq!(c.view().state, SessionState::NoReference);
        assert!(c.view().reference.is_empty());
        assert_eq!(c.view().text, "");
        assert_eq!(c.process_key(KeyEvent::Escape), KeyResult::NotHandled);
    }

    #[test]
    fn test_set_text_keeps_reference() {
        let mut c = Composer::new();
        c.set_text("roma");
        c.process_key(KeyEvent::Enter);
        c.set_text("ramo");
        c.set_text("mare");
        assert_eq!(c.view().state, SessionState::ReferenceSet);
        assert_eq!(c.view().text, "mar");
        assert_eq!(c.view().cursor, 3);
        assert_eq!(c.view().leftover, "o");
    }

    #[test]
    fn test_navigation_at_edges() {
        let mut c = Composer::new();
        assert_eq!(c.process_key(KeyEvent::Left), KeyResult::NotHandled);
        assert_eq!(c.process_key(KeyEvent::Backspace), KeyResult::NotHandled);
        assert_eq!(c.process_key(KeyEvent::Delete), KeyResult::NotHandled);
    }
}
