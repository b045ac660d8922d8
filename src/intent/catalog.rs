//! Phrase to intent lookup table

use std::collections::HashMap;
use std::fmt;

use super::{Intent, tokenize};
use crate::{Error, Result};

/// Ordered, normalized token sequence that triggers an intent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phrase(Vec<String>);

impl Phrase {
    /// Build a phrase from raw text, normalizing case and whitespace
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self(tokenize(text))
    }

    /// Build a phrase from already-normalized tokens
    #[must_use]
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self(tokens.iter().map(|t| t.as_ref().to_lowercase()).collect())
    }

    /// Number of tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the phrase has no tokens
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The phrase tokens
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Exact-match table of phrases, each bound to exactly one intent
#[derive(Debug, Default, Clone)]
pub struct PhraseCatalog {
    phrases: HashMap<Phrase, Intent>,
}

impl PhraseCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a phrase to an intent
    ///
    /// Registering the same phrase for the same intent again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePhrase`] if the phrase already triggers a
    /// different intent, or [`Error::Config`] if the phrase is blank
    pub fn register(&mut self, intent: Intent, phrase: &str) -> Result<()> {
        let phrase = Phrase::parse(phrase);
        if phrase.is_empty() {
            return Err(Error::Config(format!("blank phrase for intent {intent}")));
        }

        match self.phrases.get(&phrase) {
            Some(&existing) if existing != intent => Err(Error::DuplicatePhrase {
                phrase: phrase.to_string(),
                existing,
                rejected: intent,
            }),
            Some(_) => Ok(()),
            None => {
                tracing::trace!(%intent, %phrase, "registered phrase");
                self.phrases.insert(phrase, intent);
                Ok(())
            }
        }
    }

    /// Look up the intent bound to exactly this phrase
    #[must_use]
    pub fn lookup(&self, phrase: &Phrase) -> Option<Intent> {
        self.phrases.get(phrase).copied()
    }

    /// Look up a phrase given as raw text
    #[must_use]
    pub fn lookup_text(&self, text: &str) -> Option<Intent> {
        self.lookup(&Phrase::parse(text))
    }

    /// Number of registered phrases
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether no phrases are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Intents that have at least one phrase
    pub fn intents(&self) -> impl Iterator<Item = Intent> + '_ {
        let mut intents: Vec<Intent> = self.phrases.values().copied().collect();
        intents.sort_unstable();
        intents.dedup();
        intents.into_iter()
    }

    /// All phrases with their intents, sorted by intent then phrase
    #[must_use]
    pub fn entries(&self) -> Vec<(&Phrase, Intent)> {
        let mut entries: Vec<_> = self.phrases.iter().map(|(p, &i)| (p, i)).collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.tokens().cmp(b.0.tokens())));
        entries
    }
}
