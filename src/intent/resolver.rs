//! Utterance to intent resolution

use std::sync::Arc;

use super::{Intent, Phrase, PhraseCatalog};

/// An utterance matched to an intent, with the words left over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// Matched intent
    pub intent: Intent,
    /// Tokens after the matched phrase, in utterance order
    pub args: Vec<String>,
}

/// Outcome of resolving one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A registered phrase matched a prefix of the utterance
    Matched(ResolvedCommand),
    /// No prefix of the utterance is a registered phrase
    NoMatch,
}

/// Maps tokenized utterances to intents
///
/// Prefixes are tried from the shortest to the full utterance and the first
/// match wins, so a short phrase shadows any longer phrase it starts.
#[derive(Debug, Clone)]
pub struct IntentResolver {
    catalog: Arc<PhraseCatalog>,
}

impl IntentResolver {
    /// Create a resolver over a catalog
    #[must_use]
    pub const fn new(catalog: Arc<PhraseCatalog>) -> Self {
        Self { catalog }
    }

    /// The underlying catalog
    #[must_use]
    pub fn catalog(&self) -> &PhraseCatalog {
        &self.catalog
    }

    /// Resolve a tokenized utterance
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, tokens: &[S]) -> Resolution {
        let resolution = match tokens.len() {
            0 => Resolution::NoMatch,
            1 => self
                .catalog
                .lookup(&Phrase::from_tokens(tokens))
                .map_or(Resolution::NoMatch, |intent| {
                    Resolution::Matched(ResolvedCommand {
                        intent,
                        args: Vec::new(),
                    })
                }),
            n => (1..=n)
                .find_map(|len| {
                    let prefix = Phrase::from_tokens(&tokens[..len]);
                    tracing::trace!(len, %prefix, "trying prefix");
                    self.catalog.lookup(&prefix).map(|intent| ResolvedCommand {
                        intent,
                        args: tokens[len..]
                            .iter()
                            .map(|t| t.as_ref().to_lowercase())
                            .collect(),
                    })
                })
                .map_or(Resolution::NoMatch, Resolution::Matched),
        };

        match &resolution {
            Resolution::Matched(cmd) => {
                tracing::debug!(intent = %cmd.intent, args = ?cmd.args, "resolved intent");
            }
            Resolution::NoMatch => tracing::debug!(tokens = tokens.len(), "no intent matched"),
        }

        resolution
    }

    /// Tokenize and resolve raw recognized text
    #[must_use]
    pub fn resolve_text(&self, text: &str) -> Resolution {
        self.resolve(&super::tokenize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(entries: &[(Intent, &str)]) -> IntentResolver {
        let mut catalog = PhraseCatalog::new();
        for (intent, phrase) in entries {
            catalog.register(*intent, phrase).unwrap();
        }
        IntentResolver::new(Arc::new(catalog))
    }

    fn matched(intent: Intent, args: &[&str]) -> Resolution {
        Resolution::Matched(ResolvedCommand {
            intent,
            args: args.iter().map(ToString::to_string).collect(),
        })
    }

    #[test]
    fn test_empty_utterance_is_no_match() {
        let r = resolver(&[(Intent::Greeting, "hello")]);
        assert_eq!(r.resolve::<&str>(&[]), Resolution::NoMatch);
    }

    #[test]
    fn test_single_token_exact_only() {
        let r = resolver(&[(Intent::Greeting, "hello"), (Intent::Farewell, "see you soon")]);

        assert_eq!(r.resolve(&["hello"]), matched(Intent::Greeting, &[]));
        assert_eq!(r.resolve(&["see"]), Resolution::NoMatch);
        assert_eq!(r.resolve(&["hell"]), Resolution::NoMatch);
    }

    #[test]
    fn test_multi_token_prefix_with_args() {
        let r = resolver(&[(Intent::GoogleSearch, "найди в гугле")]);

        assert_eq!(
            r.resolve(&["найди", "в", "гугле", "котики"]),
            matched(Intent::GoogleSearch, &["котики"])
        );
    }

    #[test]
    fn test_shortest_prefix_wins() {
        let r = resolver(&[
            (Intent::GoogleSearch, "find"),
            (Intent::WikipediaSearch, "find on wikipedia"),
        ]);

        assert_eq!(
            r.resolve(&["find", "on", "wikipedia", "cats"]),
            matched(Intent::GoogleSearch, &["on", "wikipedia", "cats"])
        );
    }

    #[test]
    fn test_full_length_match_has_no_args() {
        let r = resolver(&[(Intent::TossCoin, "подбрось монетку")]);
        assert_eq!(
            r.resolve(&["подбрось", "монетку"]),
            matched(Intent::TossCoin, &[])
        );
    }

    #[test]
    fn test_no_prefix_matches() {
        let r = resolver(&[(Intent::Greeting, "hello")]);
        assert_eq!(r.resolve(&["bla", "bla", "bla"]), Resolution::NoMatch);
    }

    #[test]
    fn test_phrase_in_middle_does_not_match() {
        let r = resolver(&[(Intent::Greeting, "hello")]);
        assert_eq!(r.resolve(&["well", "hello"]), Resolution::NoMatch);
    }

    #[test]
    fn test_resolve_text_normalizes_case() {
        let r = resolver(&[(Intent::WeatherForecast, "какая погода")]);
        assert_eq!(
            r.resolve_text("Какая Погода Москва"),
            matched(Intent::WeatherForecast, &["москва"])
        );
    }
}
