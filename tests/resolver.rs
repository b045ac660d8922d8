//! Intent resolution over the built-in catalog

use std::io::Write;
use std::sync::Arc;

use martha::intent::table::build_catalog;
use martha::{Error, Intent, IntentResolver, Resolution, ResolvedCommand};

mod common;
use common::words;

fn builtin_resolver() -> IntentResolver {
    IntentResolver::new(Arc::new(build_catalog(None).unwrap()))
}

fn matched(intent: Intent, args: &[&str]) -> Resolution {
    Resolution::Matched(ResolvedCommand {
        intent,
        args: args.iter().map(ToString::to_string).collect(),
    })
}

#[test]
fn test_every_builtin_phrase_resolves_to_its_intent() {
    let catalog = build_catalog(None).unwrap();
    let entries: Vec<_> = catalog
        .entries()
        .into_iter()
        .map(|(phrase, intent)| (phrase.to_string(), intent))
        .collect();
    let resolver = IntentResolver::new(Arc::new(catalog));

    assert!(!entries.is_empty());
    for (phrase, intent) in entries {
        assert_eq!(
            resolver.resolve_text(&phrase),
            matched(intent, &[]),
            "phrase {phrase:?}"
        );
    }
}

#[test]
fn test_every_intent_has_a_phrase() {
    let catalog = build_catalog(None).unwrap();
    let intents: Vec<Intent> = catalog.intents().collect();
    assert_eq!(intents.len(), Intent::ALL.len());
}

#[test]
fn test_end_to_end_examples() {
    let resolver = builtin_resolver();

    assert_eq!(resolver.resolve(&words("привет")), matched(Intent::Greeting, &[]));
    assert_eq!(
        resolver.resolve(&words("найди в гугле котики")),
        matched(Intent::GoogleSearch, &["котики"])
    );
    assert_eq!(resolver.resolve(&words("bla bla bla")), Resolution::NoMatch);
    assert_eq!(resolver.resolve(&words("пока")), matched(Intent::Farewell, &[]));
    assert_eq!(
        resolver.resolve(&words("подбрось монетку")),
        matched(Intent::TossCoin, &[])
    );
}

#[test]
fn test_resolution_is_case_insensitive() {
    let resolver = builtin_resolver();
    assert_eq!(
        resolver.resolve_text("Find On YouTube Rust Talks"),
        matched(Intent::YoutubeSearch, &["rust", "talks"])
    );
}

#[test]
fn test_single_token_phrase_beats_longer_one() {
    let resolver = builtin_resolver();

    // "google" is registered on its own, so it wins over any longer prefix
    assert_eq!(
        resolver.resolve(&words("google search on google")),
        matched(Intent::GoogleSearch, &["search", "on", "google"])
    );
}

#[test]
fn test_user_intents_file_extends_catalog() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[greeting]\nexamples = [\"hey martha\"]").unwrap();

    let catalog = build_catalog(Some(file.path())).unwrap();
    let resolver = IntentResolver::new(Arc::new(catalog));

    assert_eq!(
        resolver.resolve_text("hey martha"),
        matched(Intent::Greeting, &[])
    );
    assert_eq!(resolver.resolve_text("привет"), matched(Intent::Greeting, &[]));
}

#[test]
fn test_user_intents_file_conflict_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[farewell]\nexamples = [\"привет\"]").unwrap();

    assert!(matches!(
        build_catalog(Some(file.path())),
        Err(Error::DuplicatePhrase { .. })
    ));
}

#[test]
fn test_user_intents_file_unknown_intent_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[dance]\nexamples = [\"dance\"]").unwrap();

    assert!(matches!(
        build_catalog(Some(file.path())),
        Err(Error::UnknownIntent(_))
    ));
}
