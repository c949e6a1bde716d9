//! Analysis engine combining normalization, similarity, role ranking and skill gaps

use crate::config::{Config, ScoringConfig};
use crate::processing::lexicon::LinguisticBackend;
use crate::processing::normalizer::Normalizer;
use crate::processing::ranker::{RoleCatalogEntry, RoleRanker, RoleScore};
use crate::processing::similarity::SimilarityEngine;
use crate::processing::skill_gap::skill_gap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Owns the process-wide linguistic backend and the reference data used by
/// every analysis. Each call to [`AnalysisEngine::analyze`] is independent.
pub struct AnalysisEngine {
    backend: LinguisticBackend,
    similarity: SimilarityEngine,
    catalog: Vec<RoleCatalogEntry>,
    vocabulary: Vec<String>,
    scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Resume vs job description similarity (0-100)
    pub match_score: f64,
    pub match_level: MatchLevel,

    /// Top-K slice of the role ranking
    pub top_roles: Vec<RoleScore>,
    /// Full role ranking, best first
    pub role_ranking: Vec<RoleScore>,

    /// Important skills in the job description that the resume lacks
    pub missing_skills: Vec<String>,

    pub resume_token_count: usize,
    pub job_token_count: usize,
    /// True when normalization ran without the linguistic backend
    pub degraded_normalization: bool,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLevel {
    Strong,
    Moderate,
    SignificantGaps,
}

impl MatchLevel {
    pub fn from_score(score: f64, scoring: &ScoringConfig) -> Self {
        if score >= scoring.strong_match_threshold {
            MatchLevel::Strong
        } else if score >= scoring.moderate_match_threshold {
            MatchLevel::Moderate
        } else {
            MatchLevel::SignificantGaps
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchLevel::Strong => "Strong Match",
            MatchLevel::Moderate => "Moderate Match",
            MatchLevel::SignificantGaps => "Significant Gaps",
        }
    }
}

impl fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl AnalysisEngine {
    /// Create an analysis engine from configuration, loading the backend once
    pub fn new(config: &Config) -> Self {
        let backend = LinguisticBackend::load(&config.analyzer);
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: &Config, backend: LinguisticBackend) -> Self {
        Self {
            backend,
            similarity: SimilarityEngine::new(config.similarity.clone()),
            catalog: config.catalog.roles.clone(),
            vocabulary: config.skills.vocabulary.clone(),
            scoring: config.scoring.clone(),
        }
    }

    pub fn backend(&self) -> &LinguisticBackend {
        &self.backend
    }

    pub fn catalog(&self) -> &[RoleCatalogEntry] {
        &self.catalog
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(&self.backend)
    }

    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer().normalize(raw)
    }

    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        self.similarity.similarity(a, b)
    }

    pub fn rank_roles(&self, resume: &str, catalog: &[RoleCatalogEntry]) -> Vec<RoleScore> {
        RoleRanker::new(self.normalizer(), &self.similarity).rank(resume, catalog)
    }

    pub fn skill_gap(&self, resume: &str, job: &str, vocabulary: &[String]) -> Vec<String> {
        skill_gap(resume, job, vocabulary)
    }

    /// Rank the configured catalog against raw resume text
    pub fn suggest_roles(&self, resume_raw: &str) -> Vec<RoleScore> {
        let resume = self.normalize(resume_raw);
        let mut ranking = self.rank_roles(&resume, &self.catalog);
        ranking.truncate(self.scoring.top_roles);
        ranking
    }

    /// Run the full analysis on raw resume and job description text
    pub fn analyze(&self, resume_raw: &str, job_raw: &str) -> AnalysisReport {
        let start_time = Instant::now();

        let resume = self.normalize(resume_raw);
        let job = self.normalize(job_raw);
        debug!(
            "Normalized resume to {} chars, job description to {} chars",
            resume.len(),
            job.len()
        );

        let match_score = self.similarity(&resume, &job);
        let match_level = MatchLevel::from_score(match_score, &self.scoring);
        info!("Job match score: {:.2}% ({})", match_score, match_level);

        let role_ranking = self.rank_roles(&resume, &self.catalog);
        let top_roles: Vec<RoleScore> = role_ranking
            .iter()
            .take(self.scoring.top_roles)
            .cloned()
            .collect();

        let missing_skills = self.skill_gap(&resume, &job, &self.vocabulary);
        debug!("Missing skills: {:?}", missing_skills);

        AnalysisReport {
            match_score,
            match_level,
            top_roles,
            role_ranking,
            missing_skills,
            resume_token_count: resume.split_whitespace().count(),
            job_token_count: job.split_whitespace().count(),
            degraded_normalization: !self.backend.is_available(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }
}

impl AnalysisReport {
    pub fn best_role(&self) -> Option<&RoleScore> {
        self.top_roles.first()
    }
}
