//! Pairwise document similarity over a jointly fit TF-IDF space

use crate::processing::tfidf::{TfidfVectorizer, VectorizerOptions};
use log::debug;

/// Scores two normalized documents on a 0-100 scale.
///
/// The vector space is fit on exactly the two inputs, so scores are
/// symmetric and depend on nothing but the pair.
pub struct SimilarityEngine {
    vectorizer: TfidfVectorizer,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(VectorizerOptions::default())
    }
}

impl SimilarityEngine {
    pub fn new(options: VectorizerOptions) -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(options),
        }
    }

    /// Similarity percentage in [0, 100], rounded to two decimals
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.trim().is_empty() || b.trim().is_empty() {
            return 0.0;
        }

        let matrix = self.vectorizer.fit_transform(&[a, b]);
        if matrix.is_empty() {
            debug!("No content terms shared by either document, similarity is 0");
            return 0.0;
        }

        match (matrix.row(0), matrix.row(1)) {
            (Some(row_a), Some(row_b)) => to_percentage(cosine_similarity(row_a, row_b)),
            _ => 0.0,
        }
    }
}

/// Cosine of the angle between two equal-length vectors; 0 when either is zero
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Scale a cosine in [0, 1] to a percentage with two decimal places
pub fn to_percentage(cosine: f64) -> f64 {
    let percentage = (cosine * 100.0 * 100.0).round() / 100.0;
    percentage.clamp(0.0, 100.0)
}

/// Similarity with the default vectorizer settings
pub fn similarity(a: &str, b: &str) -> f64 {
    SimilarityEngine::default().similarity(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_score_zero() {
        let engine = SimilarityEngine::default();
        assert_eq!(engine.similarity("", "python developer"), 0.0);
        assert_eq!(engine.similarity("python developer", ""), 0.0);
        assert_eq!(engine.similarity("   ", "  \n"), 0.0);
    }

    #[test]
    fn test_identical_documents_score_full() {
        let engine = SimilarityEngine::default();
        let text = "machine learning engineer with python and tensorflow experience";
        let score = engine.similarity(text, text);
        assert!((score - 100.0).abs() < 0.01, "got {}", score);
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        let engine = SimilarityEngine::default();
        assert_eq!(engine.similarity("python pandas", "react css"), 0.0);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let engine = SimilarityEngine::default();
        let pairs = [
            ("python sql pandas", "python sql tableau power bi dashboards"),
            ("react html css javascript", "javascript react node"),
            ("data analysis statistics", "statistics data visualization excel"),
        ];

        for (a, b) in pairs {
            assert_eq!(engine.similarity(a, b), engine.similarity(b, a));
        }
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let engine = SimilarityEngine::default();
        let score = engine.similarity("python sql pandas", "python sql tableau power bi dashboards");
        assert!(score > 0.0 && score < 100.0);
    }

    #[test]
    fn test_stop_word_documents_score_zero() {
        let engine = SimilarityEngine::default();
        assert_eq!(engine.similarity("the and of", "the and of"), 0.0);
    }

    #[test]
    fn test_score_has_two_decimals() {
        let engine = SimilarityEngine::default();
        let score = engine.similarity("python sql pandas", "python sql tableau");
        assert_eq!((score * 100.0).round() / 100.0, score);
    }

    #[test]
    fn test_cosine_similarity_edge_cases() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_percentage_clamps_and_rounds() {
        assert_eq!(to_percentage(1.0000000002), 100.0);
        assert_eq!(to_percentage(0.123456), 12.35);
        assert_eq!(to_percentage(0.0), 0.0);
    }
}
