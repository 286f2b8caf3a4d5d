/// Command interpreter types: phrases, arity, handlers.
use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::dispatch::Services;
use crate::registry::{CommandTable, RegistryError};
use crate::session::SessionState;

// ---------------------------------------------------------------------------
// Phrase
// ---------------------------------------------------------------------------

/// A registered command key: one or more lowercase words joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommandPhrase(String);

impl CommandPhrase {
    /// Normalize `text` (lowercase, single spaces) into a phrase.
    pub fn new(text: &str) -> Result<Self, RegistryError> {
        let normalized = text
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        if normalized.is_empty() {
            return Err(RegistryError::EmptyPhrase);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }

    /// True if every token of `self` starts `other` and `other` is longer.
    pub fn is_strict_prefix_of(&self, other: &CommandPhrase) -> bool {
        let mine: Vec<&str> = self.tokens().collect();
        let theirs: Vec<&str> = other.tokens().collect();
        mine.len() < theirs.len() && theirs.starts_with(&mine)
    }
}

impl fmt::Display for CommandPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Arity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    Nullary,
    Unary,
}

impl Arity {
    /// Number of parameters a handler of this arity takes.
    pub fn count(self) -> usize {
        match self {
            Self::Nullary => 0,
            Self::Unary => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// What the interpreter should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything a handler may touch while it runs.
pub struct ActionContext<'a> {
    pub services: &'a Services,
    pub session: &'a mut SessionState,
    pub table: &'a CommandTable,
}

impl ActionContext<'_> {
    /// Speak feedback through the notifier.
    pub async fn say(&self, text: &str) -> Result<()> {
        self.services.notifier.speak(text).await
    }
}

#[async_trait]
pub trait NullaryAction: Send + Sync {
    async fn run(&self, ctx: &mut ActionContext<'_>) -> Result<Flow>;
}

#[async_trait]
pub trait UnaryAction: Send + Sync {
    async fn run(&self, ctx: &mut ActionContext<'_>, param: &str) -> Result<Flow>;
}

/// A handler tagged with its arity.
#[derive(Clone)]
pub enum Handler {
    Nullary(Arc<dyn NullaryAction>),
    Unary(Arc<dyn UnaryAction>),
}

impl Handler {
    pub fn nullary(action: impl NullaryAction + 'static) -> Self {
        Self::Nullary(Arc::new(action))
    }

    pub fn unary(action: impl UnaryAction + 'static) -> Self {
        Self::Unary(Arc::new(action))
    }

    pub fn arity(&self) -> Arity {
        match self {
            Self::Nullary(_) => Arity::Nullary,
            Self::Unary(_) => Arity::Unary,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler::{:?}", self.arity())
    }
}

/// A registry entry.
#[derive(Debug, Clone)]
pub struct HandlerDescriptor {
    pub phrase: CommandPhrase,
    pub description: String,
    pub handler: Handler,
}

impl HandlerDescriptor {
    pub fn arity(&self) -> Arity {
        self.handler.arity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_is_normalized() {
        let phrase = CommandPhrase::new("  Sprawdź   POGODĘ ").unwrap();
        assert_eq!(phrase.as_str(), "sprawdź pogodę");
        assert_eq!(phrase.tokens().collect::<Vec<_>>(), ["sprawdź", "pogodę"]);
    }

    #[test]
    fn empty_phrase_is_rejected() {
        assert!(matches!(CommandPhrase::new("   "), Err(RegistryError::EmptyPhrase)));
    }

    #[test]
    fn strict_prefix_is_token_based() {
        let szukaj = CommandPhrase::new("szukaj").unwrap();
        let szukaj_wiki = CommandPhrase::new("szukaj wikipedia").unwrap();
        let szukajka = CommandPhrase::new("szukajka").unwrap();

        assert!(szukaj.is_strict_prefix_of(&szukaj_wiki));
        assert!(!szukaj_wiki.is_strict_prefix_of(&szukaj));
        assert!(!szukaj.is_strict_prefix_of(&szukaj));
        assert!(!szukaj.is_strict_prefix_of(&szukajka));
    }

    #[test]
    fn arity_counts() {
        assert_eq!(Arity::Nullary.count(), 0);
        assert_eq!(Arity::Unary.count(), 1);
    }
}
