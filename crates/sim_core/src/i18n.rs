//! Localized text lookup
//!
//! Messages are loaded from a TOML document. Nested tables are flattened into
//! dotted keys, so `[game.state.pause] message = "Pause"` and
//! `"game.state.pause.message" = "Pause"` are equivalent.

use crate::config::ConfigError;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use toml::{Table, Value};

/// Key/text catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Messages {
    texts: HashMap<String, String>,
}

impl Messages {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let messages = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded {} messages from {}", messages.len(), path.display());
        Ok(messages)
    }

    /// Parse a catalog from a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let table = contents
            .parse::<Table>()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut messages = Self::new();
        messages.flatten("", &table);
        Ok(messages)
    }

    fn flatten(&mut self, prefix: &str, table: &Table) {
        for (key, value) in table {
            let full = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
            match value {
                Value::Table(inner) => self.flatten(&full, inner),
                Value::String(text) => {
                    self.texts.insert(full, text.clone());
                }
                other => {
                    self.texts.insert(full, other.to_string());
                }
            }
        }
    }

    /// Add or replace a message
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(key.into(), text.into());
    }

    /// Text for `key`, or the key itself when unknown
    pub fn get(&self, key: &str) -> String {
        match self.texts.get(key) {
            Some(text) => text.clone(),
            None => {
                log::warn!("Missing message for key '{}'", key);
                key.to_string()
            }
        }
    }

    /// Text for `key` with `{0}`, `{1}`, ... replaced by `args`
    pub fn format(&self, key: &str, args: &[&dyn Display]) -> String {
        args.iter()
            .enumerate()
            .fold(self.get(key), |text, (i, arg)| text.replace(&format!("{{{i}}}"), &arg.to_string()))
    }

    /// Whether `key` is known
    pub fn contains(&self, key: &str) -> bool {
        self.texts.contains_key(key)
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
