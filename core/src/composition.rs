//! Committed compositions.
//!
//! A `SavedComposition` is created when the user commits a word. It records
//! the reference phrase, the word itself and the letters that were left
//! unused. It never changes afterwards.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedComposition {
    pub reference_text: String,
    pub word: String,
    pub leftover: Vec<char>,
}

impl SavedComposition {
    pub fn new(reference_text: impl Into<String>, word: impl Into<String>, leftover: Vec<char>) -> Self {
        Self {
            reference_text: reference_text.into(),
            word: word.into(),
            leftover,
        }
    }

    /// True when the word used every reference character.
    pub fn is_complete(&self) -> bool {
        self.leftover.is_empty()
    }

    /// Leftover letters joined by `separator`.
    pub fn leftover_string(&self, separator: &str) -> String {
        let mut out = String::new();
        for (i, c) in self.leftover.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push(*c);
        }
        out
    }

    /// Line shown in the saved list: the word, then the leftover letters.
    pub fn display_line(&self, separator: &str) -> String {
        if self.leftover.is_empty() {
            self.word.clone()
        } else {
            format!("{} {}", self.word, self.leftover_string(separator))
        }
    }
}

impl fmt::Display for SavedComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_line(" "))
    }
}
