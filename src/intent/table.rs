//! Intent table loading
//!
//! The built-in table ships inside the binary. A user table with the same
//! schema may add phrases on top of it:
//!
//! ```toml
//! [weather_forecast]
//! examples = ["погода в городе", "what's the weather"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::{Intent, PhraseCatalog};
use crate::{Error, Result};

/// Built-in intent table
const DEFAULT_INTENTS: &str = include_str!("../../assets/intents.toml");

/// One intent's entry in an intent table
#[derive(Debug, Default, Deserialize)]
pub struct IntentEntry {
    /// Phrases that trigger the intent
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Parsed intent table, keyed by intent identifier
#[derive(Debug, Default)]
pub struct IntentTable {
    entries: Vec<(Intent, IntentEntry)>,
}

impl IntentTable {
    /// Parse an intent table from TOML text
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed or names an unknown intent
    pub fn parse(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, IntentEntry> = toml::from_str(content)?;
        let entries = raw
            .into_iter()
            .map(|(name, entry)| Ok((name.parse::<Intent>()?, entry)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// The built-in table
    ///
    /// # Errors
    ///
    /// Returns error if the embedded table is malformed
    pub fn builtin() -> Result<Self> {
        Self::parse(DEFAULT_INTENTS)
    }

    /// Load a table from a file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read intent table {}: {e}", path.display()))
        })?;
        let table = Self::parse(&content)?;
        tracing::info!(path = %path.display(), intents = table.entries.len(), "loaded intent table");
        Ok(table)
    }

    /// Register every phrase of this table into a catalog
    ///
    /// # Errors
    ///
    /// Returns error on the first phrase that conflicts with an existing one
    pub fn register_into(&self, catalog: &mut PhraseCatalog) -> Result<()> {
        for (intent, entry) in &self.entries {
            for example in &entry.examples {
                catalog.register(*intent, example)?;
            }
        }
        Ok(())
    }
}

/// Build the phrase catalog from the built-in table and an optional user table
///
/// # Errors
///
/// Returns a configuration error if any table is invalid or two intents claim
/// the same phrase
pub fn build_catalog(extra: Option<&Path>) -> Result<PhraseCatalog> {
    let mut catalog = PhraseCatalog::new();
    IntentTable::builtin()?.register_into(&mut catalog)?;

    if let Some(path) = extra {
        IntentTable::load(path)?.register_into(&mut catalog)?;
    }

    tracing::debug!(phrases = catalog.len(), "phrase catalog ready");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_table_covers_every_intent() {
        let catalog = build_catalog(None).unwrap();
        let intents: Vec<Intent> = catalog.intents().collect();
        assert_eq!(intents, Intent::ALL.to_vec());
    }

    #[test]
    fn test_builtin_leading_space_is_normalized() {
        let catalog = build_catalog(None).unwrap();
        assert_eq!(catalog.lookup_text("find person"), Some(Intent::PersonSearch));
    }

    #[test]
    fn test_unknown_intent_rejected() {
        let err = IntentTable::parse("[dance]\nexamples = [\"dance\"]").unwrap_err();
        assert!(matches!(err, Error::UnknownIntent(name) if name == "dance"));
    }

    #[test]
    fn test_extra_table_extends_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[weather_forecast]\nexamples = [\"what's the weather\"]").unwrap();

        let catalog = build_catalog(Some(file.path())).unwrap();
        assert_eq!(
            catalog.lookup_text("what's the weather"),
            Some(Intent::WeatherForecast)
        );
        assert_eq!(catalog.lookup_text("привет"), Some(Intent::Greeting));
    }

    #[test]
    fn test_extra_table_conflict_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[greeting]\nexamples = [\"пока\"]").unwrap();

        let err = build_catalog(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::DuplicatePhrase { .. }));
    }
}
