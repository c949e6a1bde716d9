//! Role ranking against a catalog of role descriptions

use crate::processing::normalizer::Normalizer;
use crate::processing::similarity::SimilarityEngine;
use serde::{Deserialize, Serialize};

/// A role name and its skill-keyword description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCatalogEntry {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleScore {
    pub role: String,
    pub score: f64,
}

impl RoleCatalogEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

pub struct RoleRanker<'a> {
    normalizer: Normalizer<'a>,
    engine: &'a SimilarityEngine,
}

impl<'a> RoleRanker<'a> {
    pub fn new(normalizer: Normalizer<'a>, engine: &'a SimilarityEngine) -> Self {
        Self { normalizer, engine }
    }

    /// Score every catalog entry against a normalized resume.
    ///
    /// Returns the full catalog sorted by descending score; entries with equal
    /// scores keep their catalog order.
    pub fn rank(&self, resume: &str, catalog: &[RoleCatalogEntry]) -> Vec<RoleScore> {
        let mut scores: Vec<RoleScore> = catalog
            .iter()
            .map(|entry| {
                let description = self.normalizer.normalize(&entry.description);
                RoleScore {
                    role: entry.name.clone(),
                    score: self.engine.similarity(resume, &description),
                }
            })
            .collect();

        // sort_by is stable
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        scores
    }
}

pub fn rank_roles(
    normalizer: Normalizer<'_>,
    engine: &SimilarityEngine,
    resume: &str,
    catalog: &[RoleCatalogEntry],
) -> Vec<RoleScore> {
    RoleRanker::new(normalizer, engine).rank(resume, catalog)
}

/// The six reference roles
pub fn default_catalog() -> Vec<RoleCatalogEntry> {
    vec![
        RoleCatalogEntry::new(
            "Data Scientist",
            "machine learning data analysis python pandas numpy deep learning statistics sklearn",
        ),
        RoleCatalogEntry::new(
            "Machine Learning Engineer",
            "machine learning model deployment tensorflow pytorch api docker cloud python",
        ),
        RoleCatalogEntry::new(
            "Frontend Developer",
            "html css javascript react ui responsive design web development",
        ),
        RoleCatalogEntry::new(
            "Backend Developer",
            "python django flask sql api server authentication database",
        ),
        RoleCatalogEntry::new(
            "AI Research Intern",
            "artificial intelligence neural networks deep learning nlp transformers research",
        ),
        RoleCatalogEntry::new(
            "Data Analyst",
            "excel sql tableau power bi dashboards reporting statistics data visualization",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::lexicon::{Lexicon, LinguisticBackend};

    fn backend() -> LinguisticBackend {
        LinguisticBackend::Available(Lexicon::builtin().unwrap())
    }

    #[test]
    fn test_empty_resume_keeps_catalog_order() {
        let backend = backend();
        let engine = SimilarityEngine::default();
        let catalog = default_catalog();

        let ranked = rank_roles(Normalizer::new(&backend), &engine, "", &catalog);

        assert_eq!(ranked.len(), catalog.len());
        for (score, entry) in ranked.iter().zip(&catalog) {
            assert_eq!(score.role, entry.name);
            assert_eq!(score.score, 0.0);
        }
    }

    #[test]
    fn test_ranking_is_non_increasing() {
        let backend = backend();
        let normalizer = Normalizer::new(&backend);
        let engine = SimilarityEngine::default();
        let resume = normalizer.normalize("Python developer building Django and Flask APIs with SQL");

        let ranked = rank_roles(normalizer, &engine, &resume, &default_catalog());

        assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(ranked[0].role, "Backend Developer");
    }

    #[test]
    fn test_data_analyst_resume_ranks_data_analyst_first() {
        let backend = backend();
        let normalizer = Normalizer::new(&backend);
        let engine = SimilarityEngine::default();
        let resume = normalizer.normalize("Built Tableau and Power BI dashboards, Excel reporting, SQL");

        let ranked = rank_roles(normalizer, &engine, &resume, &default_catalog());
        assert_eq!(ranked[0].role, "Data Analyst");
    }

    #[test]
    fn test_ties_preserve_catalog_order() {
        let backend = backend();
        let engine = SimilarityEngine::default();
        let catalog = vec![
            RoleCatalogEntry::new("First", "rust tokio"),
            RoleCatalogEntry::new("Second", "python django"),
            RoleCatalogEntry::new("Third", "rust tokio"),
        ];

        let ranked = rank_roles(Normalizer::new(&backend), &engine, "rust tokio", &catalog);

        let order: Vec<&str> = ranked.iter().map(|s| s.role.as_str()).collect();
        assert_eq!(order, vec!["First", "Third", "Second"]);
        assert_eq!(ranked[0].score, ranked[1].score);
    }

    #[test]
    fn test_empty_catalog() {
        let backend = backend();
        let engine = SimilarityEngine::default();
        assert!(rank_roles(Normalizer::new(&backend), &engine, "python", &[]).is_empty());
    }
}
