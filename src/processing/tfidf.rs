//! TF-IDF vector space fit on a small document corpus

use crate::processing::stop_words::english_stop_words;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Vectorizer settings, exposed as the `[similarity]` config section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerOptions {
    /// Upper bound on vocabulary size
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths
    pub ngram_range: (usize, usize),
    /// Drop English stop words before building n-grams
    pub stop_words: bool,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self {
            max_features: 5000,
            ngram_range: (1, 2),
            stop_words: true,
        }
    }
}

pub struct TfidfVectorizer {
    options: VectorizerOptions,
    token_pattern: Regex,
    stop_words: HashSet<&'static str>,
}

/// Dense, L2-normalized TF-IDF rows, one per input document
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(VectorizerOptions::default())
    }
}

impl TfidfVectorizer {
    pub fn new(options: VectorizerOptions) -> Self {
        let token_pattern = Regex::new(r"(?u)\b\w\w+\b").expect("Invalid token regex");
        let stop_words = if options.stop_words {
            english_stop_words()
        } else {
            HashSet::new()
        };

        Self {
            options,
            token_pattern,
            stop_words,
        }
    }

    /// Turn a document into its sequence of n-gram terms
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.options.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Fit the vocabulary and idf weights on `documents` and return their vectors
    pub fn fit_transform(&self, documents: &[&str]) -> TfidfMatrix {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for term in self.analyze(doc) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        let mut corpus_frequency: HashMap<&str, usize> = HashMap::new();
        for doc_counts in &counts {
            for (term, &count) in doc_counts {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
                *corpus_frequency.entry(term.as_str()).or_insert(0) += count;
            }
        }

        let vocabulary = self.select_vocabulary(&document_frequency, &corpus_frequency);

        let n_docs = documents.len() as f64;
        let mut idf = vec![0.0; vocabulary.len()];
        for (term, &index) in &vocabulary {
            let df = document_frequency[term.as_str()] as f64;
            idf[index] = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
        }

        let rows = counts
            .iter()
            .map(|doc_counts| {
                let mut row = vec![0.0; vocabulary.len()];
                for (term, &count) in doc_counts {
                    if let Some(&index) = vocabulary.get(term) {
                        row[index] = count as f64 * idf[index];
                    }
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        TfidfMatrix {
            vocabulary,
            idf,
            rows,
        }
    }

    /// Keep at most `max_features` terms, preferring those found in more
    /// documents, then those occurring more often, then alphabetical order.
    fn select_vocabulary(
        &self,
        document_frequency: &HashMap<&str, usize>,
        corpus_frequency: &HashMap<&str, usize>,
    ) -> BTreeMap<String, usize> {
        let mut terms: Vec<&str> = document_frequency.keys().copied().collect();

        if terms.len() > self.options.max_features {
            terms.sort_by(|a, b| {
                document_frequency[b]
                    .cmp(&document_frequency[a])
                    .then_with(|| corpus_frequency[b].cmp(&corpus_frequency[a]))
                    .then_with(|| a.cmp(b))
            });
            terms.truncate(self.options.max_features);
        }

        terms.sort_unstable();
        terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect()
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in row.iter_mut() {
            *value /= norm;
        }
    }
}

impl TfidfMatrix {
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_builds_unigrams_and_bigrams() {
        let vectorizer = TfidfVectorizer::default();
        let terms = vectorizer.analyze("Machine learning with Python");

        assert_eq!(
            terms,
            vec!["machine", "learning", "python", "machine learning", "learning python"]
        );
    }

    #[test]
    fn test_analyze_skips_single_character_tokens() {
        let vectorizer = TfidfVectorizer::default();
        let terms = vectorizer.analyze("c r js");
        assert_eq!(terms, vec!["js"]);
    }

    #[test]
    fn test_shared_terms_get_lower_idf() {
        let vectorizer = TfidfVectorizer::default();
        let matrix = vectorizer.fit_transform(&["python sql", "python tableau"]);

        let shared = matrix.idf("python").unwrap();
        let unique = matrix.idf("sql").unwrap();
        assert!((shared - 1.0).abs() < 1e-12);
        assert!(unique > shared);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let vectorizer = TfidfVectorizer::default();
        let matrix = vectorizer.fit_transform(&["data analysis python", "python django flask"]);

        for row in matrix.rows() {
            let norm: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vocabulary_cap_keeps_shared_terms() {
        let options = VectorizerOptions {
            max_features: 2,
            ngram_range: (1, 1),
            stop_words: true,
        };
        let vectorizer = TfidfVectorizer::new(options);
        let matrix = vectorizer.fit_transform(&["python sql excel", "python sql tableau"]);

        assert_eq!(matrix.vocabulary_size(), 2);
        assert!(matrix.contains_term("python"));
        assert!(matrix.contains_term("sql"));
        assert!(!matrix.contains_term("excel"));
    }

    #[test]
    fn test_stop_word_only_documents_yield_empty_vocabulary() {
        let vectorizer = TfidfVectorizer::default();
        let matrix = vectorizer.fit_transform(&["the and of", "with from"]);
        assert!(matrix.is_empty());
    }
}
