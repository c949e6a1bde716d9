//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::ranker::{default_catalog, RoleCatalogEntry};
use crate::processing::skill_gap::default_vocabulary;
use crate::processing::tfidf::VectorizerOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analyzer: AnalyzerConfig,
    pub similarity: VectorizerOptions,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
    pub skills: SkillsConfig,
    pub catalog: CatalogConfig,
}

/// Linguistic backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// When false the normalizer runs in degraded mode
    pub enabled: bool,
    /// Alternative lexicon file; the embedded lexicon is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub strong_match_threshold: f64,
    pub moderate_match_threshold: f64,
    pub top_roles: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Text,
    Markdown,
    Html,
}

/// Important-skills vocabulary; order is significant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    pub vocabulary: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub roles: Vec<RoleCatalogEntry>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lexicon_path: None,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strong_match_threshold: 75.0,
            moderate_match_threshold: 50.0,
            top_roles: 3,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            vocabulary: default_vocabulary(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            roles: default_catalog(),
        }
    }
}

impl Config {
    /// Load the user configuration, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.similarity.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "Invalid ngram_range ({}, {}): expected 1 <= min <= max",
                min_n, max_n
            )));
        }

        if self.similarity.max_features == 0 {
            return Err(ResumeAnalyzerError::Configuration(
                "max_features must be greater than zero".to_string(),
            ));
        }

        if self.scoring.moderate_match_threshold > self.scoring.strong_match_threshold {
            return Err(ResumeAnalyzerError::Configuration(
                "moderate_match_threshold must not exceed strong_match_threshold".to_string(),
            ));
        }

        Ok(())
    }
}
