//! Localized response phrases
//!
//! Responses are keyed by their English text. Templates use `{}` placeholders
//! filled in order by [`PhraseBook::format`].

use std::collections::HashMap;

use crate::Result;
use crate::context::Language;

/// Built-in phrase table
const DEFAULT_PHRASES: &str = include_str!("../assets/phrases.json");

/// Lookup table of phrase key to per-language text
#[derive(Debug, Clone, Default)]
pub struct PhraseBook {
    phrases: HashMap<String, HashMap<Language, String>>,
}

impl PhraseBook {
    /// Parse a phrase table from JSON
    ///
    /// # Errors
    ///
    /// Returns error if the JSON does not match the table schema
    pub fn from_json(content: &str) -> Result<Self> {
        let phrases = serde_json::from_str(content)?;
        Ok(Self { phrases })
    }

    /// The built-in table
    ///
    /// # Errors
    ///
    /// Returns error if the embedded table is malformed
    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_PHRASES)
    }

    /// Localized text for `key`, or the key itself when untranslated
    #[must_use]
    pub fn get<'a>(&'a self, key: &'a str, language: Language) -> &'a str {
        match self.phrases.get(key).and_then(|p| p.get(&language)) {
            Some(text) => text,
            None => {
                tracing::warn!(key, language = %language, "phrase not translated");
                key
            }
        }
    }

    /// Localized template for `key` with `{}` placeholders filled from `args`
    #[must_use]
    pub fn format(&self, key: &str, language: Language, args: &[&str]) -> String {
        fill(self.get(key, language), args)
    }
}

/// Replace `{}` placeholders left to right
fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();

    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
