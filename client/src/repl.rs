//! Line-oriented front end.
//!
//! Each input line is either a command (`:ref`, `:save`, ...) or plain text,
//! which replaces the text bar and is reconciled against the reference.
//! Output is returned as lines so the loop in `main` only prints them.

use crate::Backends;
use anagram_core::{AnagramSettings, Composer, CompositionStore, KeyEvent, SessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: the new contents of the text bar
    Edit(String),
    Reference(String),
    Clear,
    Save,
    Persist,
    List,
    Delete(u64),
    Hints,
    Settings,
    Set { field: String, value: String },
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Edit(line.to_string()));
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((n, a)) => (n, a.trim()),
            None => (rest.trim(), ""),
        };
        match name {
            "ref" | "reference" => Ok(Command::Reference(arg.to_string())),
            "clear" => Ok(Command::Clear),
            "save" => Ok(Command::Save),
            "persist" => Ok(Command::Persist),
            "list" => Ok(Command::List),
            "delete" => arg
                .parse()
                .map(Command::Delete)
                .map_err(|_| format!("invalid id: {arg:?}")),
            "hints" => Ok(Command::Hints),
            "settings" => Ok(Command::Settings),
            "set" => match arg.split_once(char::is_whitespace) {
                Some((field, value)) => Ok(Command::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                }),
                None => Err("usage: :set <field> <value>".to_string()),
            },
            "help" | "h" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            other => Err(format!("unknown command :{other}")),
        }
    }
}

pub const HELP: &[&str] = &[
    "text            edit the current word",
    ":ref <phrase>   set the reference phrase",
    ":clear          drop the reference",
    ":save           save the current word",
    ":persist        hand saved words to the store",
    ":list           list persisted entries",
    ":delete <id>    delete a persisted entry",
    ":hints          words from the leftover letters",
    ":settings       show settings",
    ":set <f> <v>    change a setting",
    ":quit",
];

pub struct Repl {
    composer: Composer,
    backends: Backends,
    language_tag: String,
}

impl Repl {
    pub fn new(composer: Composer, backends: Backends, language_tag: impl Into<String>) -> Self {
        Self {
            composer,
            backends,
            language_tag: language_tag.into(),
        }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn store(&self) -> &dyn CompositionStore {
        self.backends.store.as_ref()
    }

    /// Run one command. `None` means quit.
    pub fn execute(&mut self, cmd: Command) -> Option<Vec<String>> {
        let out = match cmd {
            Command::Quit => return None,
            Command::Help => HELP.iter().map(|s| s.to_string()).collect(),
            Command::Edit(text) => {
                self.replace_text(&text);
                self.status()
            }
            Command::Reference(text) if text.trim().is_empty() => {
                let mut out = vec!["blank reference ignored".to_string()];
                out.extend(self.status());
                out
            }
            Command::Reference(text) => {
                if self.composer.session().state() == SessionState::ReferenceSet {
                    self.composer.process_key(KeyEvent::Escape);
                }
                self.replace_text(&text);
                self.composer.process_key(KeyEvent::Enter);
                self.status()
            }
            Command::Clear => {
                self.composer.process_key(KeyEvent::Escape);
                self.status()
            }
            Command::Save if self.composer.session().state() != SessionState::ReferenceSet => {
                vec!["nothing to save".to_string()]
            }
            Command::Save => {
                self.composer.process_key(KeyEvent::Enter);
                match self.composer.view_mut().take_committed() {
                    Some(word) => vec![format!("saved: {word}")],
                    None => vec!["nothing to save".to_string()],
                }
            }
            Command::Persist => {
                let result = self.composer.session_mut().persist(self.backends.store.as_mut());
                self.composer.sync_view();
                match result {
                    Ok(0) => vec!["nothing to persist".to_string()],
                    Ok(n) => vec![format!("persisted {n} composition(s)")],
                    Err(e) => vec![format!("error: {e}")],
                }
            }
            Command::List => {
                match self
                    .composer
                    .session_mut()
                    .refresh_entries(self.backends.store.as_ref())
                {
                    Ok([]) => vec!["no persisted entries".to_string()],
                    Ok(entries) => entries
                        .iter()
                        .map(|e| format!("#{} {}: {}", e.id, e.model, e.anagrams.replace('\n', " | ")))
                        .collect(),
                    Err(e) => vec![format!("error: {e}")],
                }
            }
            Command::Delete(id) => {
                match self
                    .composer
                    .session_mut()
                    .delete_entry(self.backends.store.as_mut(), id)
                {
                    Ok(()) => vec![format!("deleted #{id}")],
                    Err(e) => vec![format!("error: {e}")],
                }
            }
            Command::Hints => self.hints(),
            Command::Settings => self.settings(),
            Command::Set { field, value } => self.set(&field, &value),
        };
        Some(out)
    }

    fn replace_text(&mut self, text: &str) {
        self.composer.set_text(text);
    }

    fn hints(&mut self) -> Vec<String> {
        let Some(service) = self.backends.hints.as_deref() else {
            return vec!["hints unavailable offline".to_string()];
        };
        match self
            .composer
            .session_mut()
            .fetch_hints(service, &self.language_tag)
        {
            Ok(Some(panel)) => {
                let mut out = vec![format!(
                    "{} result(s) for \"{}\", {} recursive call(s)",
                    panel.result_count, panel.leftover, panel.recursion_count
                )];
                out.extend(panel.hints.iter().cloned());
                out
            }
            Ok(None) => vec!["no unused characters to fetch hints for".to_string()],
            Err(e) => vec![format!("error: {e}")],
        }
    }

    fn settings(&mut self) -> Vec<String> {
        if let Err(e) = self.backends.settings.load(&self.language_tag) {
            return vec![format!("error: {e}")];
        }
        let mut out = settings_lines(&self.backends.settings.settings());
        out.push(format!(
            "authenticated = {}",
            self.backends.settings.is_authenticated()
        ));
        out
    }

    fn set(&mut self, field: &str, value: &str) -> Vec<String> {
        let mut s = self.backends.settings.settings();
        let parsed = match field {
            "corpus_key" => {
                s.corpus_key = value.to_string();
                Ok(())
            }
            "min_word_length" => value.parse().map(|v| s.min_word_length = v).map_err(|_| ()),
            "max_word_length" => value.parse().map(|v| s.max_word_length = v).map_err(|_| ()),
            "max_results" => value.parse().map(|v| s.max_results = v).map_err(|_| ()),
            "prioritize_long_words" => value
                .parse()
                .map(|v| s.prioritize_long_words = v)
                .map_err(|_| ()),
            _ => return vec![format!("unknown setting {field:?}")],
        };
        if parsed.is_err() {
            return vec![format!("invalid value for {field}: {value:?}")];
        }
        match self.backends.settings.save(s) {
            Ok(saved) => settings_lines(saved),
            Err(e) => vec![format!("error: {e}")],
        }
    }

    /// Reference, text bar and leftover as display lines.
    pub fn status(&self) -> Vec<String> {
        let view = self.composer.view();
        match view.state {
            SessionState::NoReference => vec!["no reference (use :ref <phrase>)".to_string()],
            SessionState::ReferenceSet => vec![
                format!("reference: {}", view.marked_reference()),
                format!("word:      {}", view.text),
                format!("leftover:  {}", view.leftover),
            ],
        }
    }
}

fn settings_lines(s: &AnagramSettings) -> Vec<String> {
    vec![
        format!("corpus_key = {}", s.corpus_key),
        format!("min_word_length = {}", s.min_word_length),
        format!("max_word_length = {}", s.max_word_length),
        format!("max_results = {}", s.max_results),
        format!("prioritize_long_words = {}", s.prioritize_long_words),
    ]
}
