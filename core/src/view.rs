//! Display state produced by the composer.
//!
//! Plain data: after each key the front end reads these fields to redraw
//! the text bar, the reference letters and the saved list.

use crate::session::SessionState;

/// One reference letter and whether the current text uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceGlyph {
    pub ch: char,
    pub used: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerView {
    pub state: SessionState,

    /// Text bar contents
    pub text: String,

    /// Cursor within `text` (byte offset)
    pub cursor: usize,

    /// Reference letters in pool order
    pub reference: Vec<ReferenceGlyph>,

    /// Unused reference letters, in pool order
    pub leftover: String,

    /// Saved compositions, most recent first
    pub saved_lines: Vec<String>,

    /// Word committed by the last key, if any (consume and clear)
    pub committed: Option<String>,
}

impl ComposerView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reference letters in use.
    pub fn used_count(&self) -> usize {
        self.reference.iter().filter(|g| g.used).count()
    }

    /// Reference rendered with used letters bracketed, e.g. `[r]o[m]a`.
    pub fn marked_reference(&self) -> String {
        let mut out = String::new();
        for g in &self.reference {
            if g.used {
                out.push('[');
                out.push(g.ch);
                out.push(']');
            } else {
                out.push(g.ch);
            }
        }
        out
    }

    pub fn take_committed(&mut self) -> Option<String> {
        self.committed.take()
    }
}
