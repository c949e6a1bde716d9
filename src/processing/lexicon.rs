//! Linguistic backend: stop-word classification and rule-based lemmatization
//!
//! The backend is built once at startup and passed by reference to the
//! normalizer. When it cannot be built the process keeps running with an
//! [`LinguisticBackend::Unavailable`] backend and normalization degrades to
//! lowercasing and trimming.

use crate::config::AnalyzerConfig;
use crate::error::{Result, ResumeAnalyzerError};
use log::{debug, warn};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::Path;

const BUILTIN_LEXICON: &str = include_str!("../../resources/lexicon.toml");

#[derive(Debug, Deserialize)]
struct LexiconFile {
    stop_words: Vec<String>,
    #[serde(default)]
    irregular: HashMap<String, String>,
    #[serde(default)]
    protected: Vec<String>,
}

/// Word lists and exception tables backing lemmatization
#[derive(Debug, Clone)]
pub struct Lexicon {
    stop_words: HashSet<String>,
    irregular: HashMap<String, String>,
    protected: HashSet<String>,
}

/// Availability of the linguistic analyzer for the lifetime of the process
#[derive(Debug, Clone)]
pub enum LinguisticBackend {
    Available(Lexicon),
    Unavailable { reason: String },
}

impl Lexicon {
    /// Parse the lexicon shipped inside the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_LEXICON)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeAnalyzerError::Lexicon(format!("Failed to read lexicon '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content)
            .map_err(|e| ResumeAnalyzerError::Lexicon(format!("Failed to parse lexicon: {}", e)))?;

        if file.stop_words.is_empty() {
            return Err(ResumeAnalyzerError::Lexicon("Lexicon has no stop words".to_string()));
        }

        Ok(Self {
            stop_words: file.stop_words.into_iter().map(|w| w.to_lowercase()).collect(),
            irregular: file
                .irregular
                .into_iter()
                .map(|(form, lemma)| (form.to_lowercase(), lemma.to_lowercase()))
                .collect(),
            protected: file.protected.into_iter().map(|w| w.to_lowercase()).collect(),
        })
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    /// Reduce a lowercase word to its base form.
    ///
    /// Lookups run in order: protected words, irregular forms, then suffix
    /// rules for plurals, past tense and progressive forms. Words containing
    /// anything other than letters are returned untouched.
    pub fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.protected.contains(word) {
            return Cow::Borrowed(word);
        }
        if let Some(lemma) = self.irregular.get(word) {
            return Cow::Owned(lemma.clone());
        }
        if word.chars().count() <= 3 || !word.chars().all(|c| c.is_alphabetic()) {
            return Cow::Borrowed(word);
        }

        if let Some(lemma) = reduce_plural(word) {
            return Cow::Owned(lemma);
        }
        if let Some(stem) = word.strip_suffix("ied") {
            return Cow::Owned(format!("{}y", stem));
        }
        if let Some(stem) = word.strip_suffix("ed") {
            if let Some(lemma) = restore_stem(stem) {
                return Cow::Owned(lemma);
            }
        }
        if let Some(stem) = word.strip_suffix("ing") {
            if let Some(lemma) = restore_stem(stem) {
                return Cow::Owned(lemma);
            }
        }

        Cow::Borrowed(word)
    }
}

fn reduce_plural(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() > 1 {
            return Some(format!("{}y", stem));
        }
    }
    if word.ends_with("sses") {
        return Some(word[..word.len() - 2].to_string());
    }
    for suffix in ["xes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    if word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return Some(word[..word.len() - 1].to_string());
    }
    None
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Rebuild a base form after an "-ed" or "-ing" suffix was removed.
fn restore_stem(stem: &str) -> Option<String> {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() < 3 || !chars.iter().any(|&c| is_vowel(c) || c == 'y') {
        return None;
    }
    // speed, proceed
    if stem.ends_with('e') {
        return None;
    }

    let last = chars[chars.len() - 1];
    let prev = chars[chars.len() - 2];

    // planned -> plan, running -> run; install and pass keep their doubles
    if chars.len() > 3 && last == prev && !is_vowel(last) && !matches!(last, 'l' | 's' | 'z') {
        return Some(chars[..chars.len() - 1].iter().collect());
    }

    let needs_e = last == 'v'
        || ["at", "bl", "iz", "yz", "ur", "ut", "nc"].iter().any(|s| stem.ends_with(s))
        || (matches!(last, 'c' | 'g') && is_vowel(prev));

    if needs_e {
        Some(format!("{}e", stem))
    } else {
        Some(stem.to_string())
    }
}

impl LinguisticBackend {
    /// Build the backend described by the configuration.
    ///
    /// Never fails: problems loading the lexicon are logged and produce the
    /// unavailable backend.
    pub fn load(config: &AnalyzerConfig) -> Self {
        if !config.enabled {
            debug!("Linguistic analyzer disabled by configuration");
            return Self::unavailable("disabled by configuration");
        }

        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::from_path(path),
            None => Lexicon::builtin(),
        };

        match lexicon {
            Ok(lexicon) => {
                debug!("Linguistic analyzer ready ({} stop words)", lexicon.stop_word_count());
                Self::Available(lexicon)
            }
            Err(e) => {
                warn!("Linguistic analyzer unavailable, normalization will be limited: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable { reason: reason.into() }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn lexicon(&self) -> Option<&Lexicon> {
        match self {
            Self::Available(lexicon) => Some(lexicon),
            Self::Unavailable { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::builtin().unwrap()
    }

    #[test]
    fn test_builtin_lexicon_parses() {
        let lexicon = lexicon();
        assert!(lexicon.is_stop_word("the"));
        assert!(lexicon.is_stop_word("and"));
        assert!(!lexicon.is_stop_word("python"));
    }

    #[test]
    fn test_plural_reduction() {
        let lexicon = lexicon();
        assert_eq!(lexicon.lemmatize("dashboards"), "dashboard");
        assert_eq!(lexicon.lemmatize("libraries"), "library");
        assert_eq!(lexicon.lemmatize("processes"), "process");
        assert_eq!(lexicon.lemmatize("matches"), "match");
        assert_eq!(lexicon.lemmatize("skills"), "skill");
        assert_eq!(lexicon.lemmatize("apis"), "api");
        assert_eq!(lexicon.lemmatize("basis"), "basis");
        assert_eq!(lexicon.lemmatize("tennis"), "tennis");
        assert_eq!(lexicon.lemmatize("thesis"), "thesis");
        assert_eq!(lexicon.lemmatize("crises"), "crisis");
        assert_eq!(lexicon.lemmatize("theses"), "thesis");
    }

    #[test]
    fn test_verb_forms() {
        let lexicon = lexicon();
        assert_eq!(lexicon.lemmatize("running"), "run");
        assert_eq!(lexicon.lemmatize("developed"), "develop");
        assert_eq!(lexicon.lemmatize("managed"), "manage");
        assert_eq!(lexicon.lemmatize("created"), "create");
        assert_eq!(lexicon.lemmatize("optimized"), "optimize");
        assert_eq!(lexicon.lemmatize("improved"), "improve");
        assert_eq!(lexicon.lemmatize("installed"), "install");
        assert_eq!(lexicon.lemmatize("deployed"), "deploy");
        assert_eq!(lexicon.lemmatize("experienced"), "experience");
        assert_eq!(lexicon.lemmatize("studied"), "study");
        assert_eq!(lexicon.lemmatize("added"), "add");
        assert_eq!(lexicon.lemmatize("speed"), "speed");
    }

    #[test]
    fn test_irregular_and_protected_forms() {
        let lexicon = lexicon();
        assert_eq!(lexicon.lemmatize("built"), "build");
        assert_eq!(lexicon.lemmatize("led"), "lead");
        assert_eq!(lexicon.lemmatize("used"), "use");
        assert_eq!(lexicon.lemmatize("uses"), "use");
        assert_eq!(lexicon.lemmatize("learning"), "learning");
        assert_eq!(lexicon.lemmatize("analysis"), "analysis");
        assert_eq!(lexicon.lemmatize("statistics"), "statistics");
        assert_eq!(lexicon.lemmatize("pandas"), "pandas");
    }

    #[test]
    fn test_short_and_non_alphabetic_words_untouched() {
        let lexicon = lexicon();
        assert_eq!(lexicon.lemmatize("sql"), "sql");
        assert_eq!(lexicon.lemmatize("string"), "string");
        assert_eq!(lexicon.lemmatize("node.js"), "node.js");
        assert_eq!(lexicon.lemmatize("python3"), "python3");
    }

    #[test]
    fn test_disabled_config_yields_unavailable_backend() {
        let config = AnalyzerConfig {
            enabled: false,
            lexicon_path: None,
        };
        assert!(!LinguisticBackend::load(&config).is_available());
    }

    #[test]
    fn test_missing_lexicon_file_yields_unavailable_backend() {
        let config = AnalyzerConfig {
            enabled: true,
            lexicon_path: Some("/nonexistent/lexicon.toml".into()),
        };
        let backend = LinguisticBackend::load(&config);
        assert!(!backend.is_available());
        assert!(backend.lexicon().is_none());
    }

    #[test]
    fn test_custom_lexicon_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.toml");
        std::fs::write(&path, "stop_words = [\"foo\"]\n[irregular]\nmice = \"mouse\"\n").unwrap();

        let lexicon = Lexicon::from_path(&path).unwrap();
        assert!(lexicon.is_stop_word("foo"));
        assert!(!lexicon.is_stop_word("the"));
        assert_eq!(lexicon.lemmatize("mice"), "mouse");
    }
}
