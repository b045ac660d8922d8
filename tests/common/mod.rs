//! Shared test utilities
//!
//! Provider doubles that record what the assistant said and opened, and can
//! be switched to fail.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;

use martha::intent::table::build_catalog;
use martha::providers::{
    Article, Browser, KnowledgeProvider, SearchProvider, SpeechInput, SpeechOutput,
    TranslationProvider, WeatherProvider, WeatherReport,
};
use martha::{
    AssistantContext, CommandRegistry, Dispatcher, Error, Language, PhraseBook, Result, Services,
    VoiceProfile,
};

/// Everything the doubles observed
#[derive(Clone, Default)]
pub struct Recorder {
    /// Spoken lines with the language they were spoken in
    pub spoken: Rc<RefCell<Vec<(String, Language)>>>,
    /// URLs opened in the browser
    pub opened: Rc<RefCell<Vec<String>>>,
    /// Search queries
    pub queries: Rc<RefCell<Vec<String>>>,
    /// Translation requests as (text, source, dest)
    pub translations: Rc<RefCell<Vec<(String, Language, Language)>>>,
}

impl Recorder {
    /// Spoken text only
    pub fn lines(&self) -> Vec<String> {
        self.spoken.borrow().iter().map(|(text, _)| text.clone()).collect()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

/// Which providers should fail, and what the healthy ones return
#[derive(Clone)]
pub struct Fakes {
    pub fail_speech: bool,
    pub fail_browser: bool,
    pub fail_search: bool,
    pub fail_knowledge: bool,
    pub fail_translation: bool,
    pub fail_weather: bool,
    pub search_results: Vec<String>,
    pub article: Article,
    pub translation: String,
    pub weather: WeatherReport,
}

impl Default for Fakes {
    fn default() -> Self {
        Self {
            fail_speech: false,
            fail_browser: false,
            fail_search: false,
            fail_knowledge: false,
            fail_translation: false,
            fail_weather: false,
            search_results: vec!["https://example.com/first".to_string()],
            article: Article {
                exists: true,
                summary: "Cats are small mammals. They purr. They sleep a lot.".to_string(),
                url: "https://en.wikipedia.org/wiki/Cat".to_string(),
            },
            translation: "cat".to_string(),
            weather: WeatherReport {
                temperature_c: -3.5,
                wind_speed: 4.0,
                pressure_hpa: 1021.0,
            },
        }
    }
}

pub struct FakeSpeech {
    recorder: Recorder,
    fail: bool,
}

#[async_trait(?Send)]
impl SpeechOutput for FakeSpeech {
    async fn say(&mut self, text: &str, voice: &VoiceProfile) -> Result<()> {
        if self.fail {
            return Err(Error::Tts("speaker unplugged".to_string()));
        }
        self.recorder
            .spoken
            .borrow_mut()
            .push((text.to_string(), voice.language));
        Ok(())
    }
}

pub struct FakeBrowser {
    recorder: Recorder,
    fail: bool,
}

impl Browser for FakeBrowser {
    fn open(&self, url: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Browser("no browser".to_string()));
        }
        self.recorder.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

pub struct FakeSearch {
    recorder: Recorder,
    results: Vec<String>,
    fail: bool,
}

#[async_trait(?Send)]
impl SearchProvider for FakeSearch {
    async fn search(&self, query: &str, _language: Language) -> Result<Vec<String>> {
        self.recorder.queries.borrow_mut().push(query.to_string());
        if self.fail {
            return Err(Error::Search("search backend down".to_string()));
        }
        Ok(self.results.clone())
    }
}

pub struct FakeKnowledge {
    article: Article,
    fail: bool,
}

#[async_trait(?Send)]
impl KnowledgeProvider for FakeKnowledge {
    async fn lookup(&self, _term: &str, _language: Language) -> Result<Article> {
        if self.fail {
            return Err(Error::Knowledge("wikipedia down".to_string()));
        }
        Ok(self.article.clone())
    }
}

pub struct FakeTranslator {
    recorder: Recorder,
    translation: String,
    fail: bool,
}

#[async_trait(?Send)]
impl TranslationProvider for FakeTranslator {
    async fn translate(&self, text: &str, source: Language, dest: Language) -> Result<String> {
        self.recorder
            .translations
            .borrow_mut()
            .push((text.to_string(), source, dest));
        if self.fail {
            return Err(Error::Translation("translator down".to_string()));
        }
        Ok(self.translation.clone())
    }
}

pub struct FakeWeather {
    report: WeatherReport,
    fail: bool,
}

#[async_trait(?Send)]
impl WeatherProvider for FakeWeather {
    async fn current_weather(&self, _city: &str) -> Result<WeatherReport> {
        if self.fail {
            return Err(Error::Weather("weather service down".to_string()));
        }
        Ok(self.report)
    }
}

/// Speech input that replays a fixed script, then reports the input closed
pub struct ScriptedInput {
    script: VecDeque<Result<String>>,
}

impl ScriptedInput {
    pub fn new(script: Vec<Result<String>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

#[async_trait(?Send)]
impl SpeechInput for ScriptedInput {
    async fn listen(&mut self, _voice: &VoiceProfile) -> Result<String> {
        self.script.pop_front().unwrap_or(Err(Error::InputClosed))
    }
}

/// Services backed by doubles
pub fn services(fakes: &Fakes, recorder: &Recorder) -> Services {
    Services {
        speech: Box::new(FakeSpeech {
            recorder: recorder.clone(),
            fail: fakes.fail_speech,
        }),
        browser: Box::new(FakeBrowser {
            recorder: recorder.clone(),
            fail: fakes.fail_browser,
        }),
        search: Box::new(FakeSearch {
            recorder: recorder.clone(),
            results: fakes.search_results.clone(),
            fail: fakes.fail_search,
        }),
        knowledge: Box::new(FakeKnowledge {
            article: fakes.article.clone(),
            fail: fakes.fail_knowledge,
        }),
        translator: Box::new(FakeTranslator {
            recorder: recorder.clone(),
            translation: fakes.translation.clone(),
            fail: fakes.fail_translation,
        }),
        weather: Box::new(FakeWeather {
            report: fakes.weather,
            fail: fakes.fail_weather,
        }),
        phrases: PhraseBook::builtin().expect("builtin phrases"),
    }
}

/// Dispatcher over the built-in catalog and the default context
pub fn dispatcher(fakes: &Fakes) -> (Dispatcher, Recorder) {
    dispatcher_with(fakes, CommandRegistry::standard())
}

/// Dispatcher with a custom registry
pub fn dispatcher_with(fakes: &Fakes, registry: CommandRegistry) -> (Dispatcher, Recorder) {
    let recorder = Recorder::default();
    let catalog = Arc::new(build_catalog(None).expect("builtin catalog"));
    let dispatcher = Dispatcher::new(
        catalog,
        registry,
        services(fakes, &recorder),
        AssistantContext::default(),
    )
    .expect("dispatcher");
    (dispatcher, recorder)
}

/// Split an utterance into tokens
pub fn words(text: &str) -> Vec<String> {
    martha::intent::tokenize(text)
}
