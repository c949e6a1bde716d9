//! Text normalization into canonical lemma sequences

use crate::processing::lexicon::{Lexicon, LinguisticBackend};
use unicode_segmentation::UnicodeSegmentation;

/// Normalizes raw document text using a shared linguistic backend.
///
/// With an available backend the text is lowercased, split on Unicode word
/// boundaries, stripped of stop words and punctuation, and each surviving
/// token is replaced by its lemma. Without one, the text is only lowercased
/// and trimmed.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    backend: &'a LinguisticBackend,
}

impl<'a> Normalizer<'a> {
    pub fn new(backend: &'a LinguisticBackend) -> Self {
        Self { backend }
    }

    pub fn is_degraded(&self) -> bool {
        !self.backend.is_available()
    }

    pub fn normalize(&self, raw: &str) -> String {
        match self.backend.lexicon() {
            Some(lexicon) => self.lemmatize_text(lexicon, raw),
            None => raw.to_lowercase().trim().to_string(),
        }
    }

    /// Lowercase tokens in document order, punctuation and whitespace removed
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_word_bounds()
            .filter(|segment| segment.chars().any(char::is_alphanumeric))
            .map(strip_possessive)
            .map(str::to_string)
            .collect()
    }

    fn lemmatize_text(&self, lexicon: &Lexicon, raw: &str) -> String {
        let lemmas: Vec<String> = self
            .tokenize(raw)
            .iter()
            .filter(|token| !lexicon.is_stop_word(token))
            .map(|token| lexicon.lemmatize(token).trim().to_string())
            .filter(|lemma| !lemma.is_empty())
            .collect();

        lemmas.join(" ")
    }
}

fn strip_possessive(token: &str) -> &str {
    token
        .strip_suffix("'s")
        .or_else(|| token.strip_suffix("\u{2019}s"))
        .unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> LinguisticBackend {
        LinguisticBackend::Available(Lexicon::builtin().unwrap())
    }

    #[test]
    fn test_normalize_removes_stop_words_and_punctuation() {
        let backend = available();
        let normalizer = Normalizer::new(&backend);

        let normalized = normalizer.normalize("Experienced with Python, SQL and Tableau!");
        assert_eq!(normalized, "experience python sql tableau");
    }

    #[test]
    fn test_normalize_lemmatizes_tokens() {
        let backend = available();
        let normalizer = Normalizer::new(&backend);

        let normalized = normalizer.normalize("Built dashboards and deployed models");
        assert_eq!(normalized, "build dashboard deploy model");
    }

    #[test]
    fn test_normalize_keeps_domain_terms() {
        let backend = available();
        let normalizer = Normalizer::new(&backend);

        let normalized = normalizer.normalize("Machine Learning, data analysis & statistics");
        assert_eq!(normalized, "machine learning data analysis statistics");
    }

    #[test]
    fn test_normalize_keeps_words_ending_in_is() {
        let backend = available();
        let normalizer = Normalizer::new(&backend);

        let normalized = normalizer.normalize("The Thesis on APIs and tennis crises");
        assert_eq!(normalized, "thesis api tennis crisis");
    }

    #[test]
    fn test_normalize_empty_input() {
        let backend = available();
        let normalizer = Normalizer::new(&backend);

        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   \n\t "), "");
        assert_eq!(normalizer.normalize("the and of"), "");
    }

    #[test]
    fn test_degraded_mode_lowercases_and_trims() {
        let backend = LinguisticBackend::unavailable("test");
        let normalizer = Normalizer::new(&backend);

        assert!(normalizer.is_degraded());
        for input in ["  Senior Python Developer, SQL!  ", "", "   ", "Already lower"] {
            assert_eq!(normalizer.normalize(input), input.to_lowercase().trim());
        }
    }

    #[test]
    fn test_degraded_mode_is_idempotent() {
        let backend = LinguisticBackend::unavailable("test");
        let normalizer = Normalizer::new(&backend);

        let once = normalizer.normalize("  The Quick Fox ");
        assert_eq!(normalizer.normalize(&once), once);
    }

    #[test]
    fn test_tokenize_strips_possessives() {
        let backend = available();
        let normalizer = Normalizer::new(&backend);

        let tokens = normalizer.tokenize("Python's ecosystem, node.js");
        assert_eq!(tokens, vec!["python", "ecosystem", "node.js"]);
    }
}
