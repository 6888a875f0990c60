//! Text buffer with cursor tracking for the composer.
//!
//! Holds the raw text being typed and a byte-offset cursor that always sits
//! on a char boundary. After each change the composer swaps in the
//! reconciled text with [`InputBuffer::replace`].

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputBuffer {
    text: String,
    cursor: usize, // byte offset
}

impl InputBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position as a byte offset into `text`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clear text and reset the cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Swap in new text; the cursor is clamped back to a char boundary.
    pub fn replace(&mut self, text: &str, cursor: usize) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor = self.floor_boundary(cursor);
    }

    /// Insert a character at the cursor and move past it.
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert a string at the cursor and move past it.
    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Backspace. Returns true if a character was removed.
    pub fn delete_before(&mut self) -> bool {
        match self.prev_boundary() {
            Some(prev) => {
                self.text.remove(prev);
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Delete key. Returns true if a character was removed.
    pub fn delete_after(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    /// Move one character left. Returns false at the start.
    pub fn move_left(&mut self) -> bool {
        match self.prev_boundary() {
            Some(prev) => {
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Move one character right. Returns false at the end.
    pub fn move_right(&mut self) -> bool {
        match self.text[self.cursor..].chars().next() {
            Some(c) => {
                self.cursor += c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Move the cursor to the start.
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn floor_boundary(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}
