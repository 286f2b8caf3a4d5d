/// Command table: phrase → handler descriptor.
use std::collections::HashMap;

use thiserror::Error;

use crate::types::{CommandPhrase, Handler, HandlerDescriptor};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command phrase must contain at least one word")]
    EmptyPhrase,

    #[error("command phrase \"{0}\" is already registered")]
    DuplicatePhrase(String),
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Registered commands, kept in registration order for listing.
#[derive(Debug, Default)]
pub struct CommandTable {
    entries: Vec<HandlerDescriptor>,
    index: HashMap<String, usize>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `phrase`. The handler variant declares the arity.
    pub fn register(
        &mut self,
        phrase: &str,
        description: impl Into<String>,
        handler: Handler,
    ) -> Result<(), RegistryError> {
        let phrase = CommandPhrase::new(phrase)?;
        if self.index.contains_key(phrase.as_str()) {
            return Err(RegistryError::DuplicatePhrase(phrase.as_str().to_string()));
        }
        self.index.insert(phrase.as_str().to_string(), self.entries.len());
        self.entries.push(HandlerDescriptor {
            phrase,
            description: description.into(),
            handler,
        });
        Ok(())
    }

    /// Exact lookup of an already-normalized phrase.
    pub fn lookup(&self, phrase: &str) -> Option<&HandlerDescriptor> {
        self.index.get(phrase).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.index.contains_key(phrase)
    }

    pub fn all(&self) -> &[HandlerDescriptor] {
        &self.entries
    }

    /// Phrases in registration order.
    pub fn phrases(&self) -> impl Iterator<Item = &CommandPhrase> {
        self.entries.iter().map(|e| &e.phrase)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every `(shorter, longer)` pair where `shorter` is a strict token-prefix
    /// of `longer`. The parser stops at the shortest match, so `longer` can
    /// never be reached.
    pub fn shadowed_phrases(&self) -> Vec<(&CommandPhrase, &CommandPhrase)> {
        let mut pairs = Vec::new();
        for a in self.phrases() {
            for b in self.phrases() {
                if a.is_strict_prefix_of(b) {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }
}
