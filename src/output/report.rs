//! Report structures built from an analysis result

use crate::processing::analyzer::{AnalysisReport, MatchLevel};
use crate::processing::ranker::RoleScore;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Analysis result plus the guidance and metadata shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub summary: MatchSummary,
    pub career_insight: Option<CareerInsight>,
    pub skill_gap: SkillGapSection,
    pub metadata: ReportMetadata,
    pub analysis: AnalysisReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_score: f64,
    pub match_level: MatchLevel,
    pub top_roles: Vec<RoleScore>,
}

/// Direction suggested by the best-ranked role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerInsight {
    pub best_role: String,
    pub best_score: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapSection {
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Local>,
    pub resume_source: String,
    pub job_source: String,
    pub degraded_normalization: bool,
    pub processing_time_ms: u64,
    pub version: String,
}

const CAREER_RECOMMENDATIONS: &[&str] = &[
    "Build 2-3 high-quality, domain-specific projects",
    "Quantify achievements (%, time saved, scale, revenue impact)",
    "Incorporate industry-standard keywords naturally",
    "Customize the resume for each application",
];

const GAP_SUGGESTIONS: &[&str] = &[
    "Add concrete project examples using these technologies",
    "Include measurable results (accuracy, speed, scale)",
    "Create a dedicated Technical Skills section",
    "Mention specific tools, libraries and versions",
];

const COVERAGE_SUGGESTIONS: &[&str] = &[
    "Add more quantifiable achievements",
    "Write stronger impact statements",
];

impl MatchReport {
    pub fn new(analysis: AnalysisReport, resume_source: &str, job_source: &str) -> Self {
        Self::with_timestamp(analysis, resume_source, job_source, Local::now())
    }

    pub fn with_timestamp(
        analysis: AnalysisReport,
        resume_source: &str,
        job_source: &str,
        generated_at: DateTime<Local>,
    ) -> Self {
        let career_insight = analysis.best_role().map(|best| CareerInsight {
            best_role: best.role.clone(),
            best_score: best.score,
            recommendations: to_strings(CAREER_RECOMMENDATIONS),
        });

        let suggestions = if analysis.missing_skills.is_empty() {
            to_strings(COVERAGE_SUGGESTIONS)
        } else {
            to_strings(GAP_SUGGESTIONS)
        };

        Self {
            summary: MatchSummary {
                match_score: analysis.match_score,
                match_level: analysis.match_level,
                top_roles: analysis.top_roles.clone(),
            },
            career_insight,
            skill_gap: SkillGapSection {
                missing_skills: analysis.missing_skills.clone(),
                suggestions,
            },
            metadata: ReportMetadata {
                generated_at,
                resume_source: resume_source.to_string(),
                job_source: job_source.to_string(),
                degraded_normalization: analysis.degraded_normalization,
                processing_time_ms: analysis.processing_time_ms,
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            analysis,
        }
    }

    pub fn has_gaps(&self) -> bool {
        !self.skill_gap.missing_skills.is_empty()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Round to one decimal place for display
pub fn display_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// Capitalize the first letter of each word ("power bi" -> "Power Bi")
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
