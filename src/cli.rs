//! CLI interface for the resume analyzer

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Resume and job description match scoring")]
#[command(long_about = "Score a resume against a job description with TF-IDF cosine similarity, rank it against common job roles and list important skills the resume is missing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        #[command(flatten)]
        job: JobSource,

        /// Output format: console, json, text, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save the report to a file; without a path a timestamped name is used
        #[arg(short, long, num_args = 0..=1)]
        save: Option<Option<PathBuf>>,

        /// Number of recommended roles to show
        #[arg(short, long)]
        top: Option<usize>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Rank a resume against the role catalog
    Roles {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Number of roles to show
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Print the normalized form of a text
    Normalize {
        /// Text to normalize
        text: String,

        /// Lowercase and trim only, as when the linguistic backend is unavailable
        #[arg(long)]
        degraded: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

impl Commands {
    /// Whether the command reads the configuration file.
    ///
    /// `config reset` and `config path` must work when the file is invalid.
    pub fn loads_config(&self) -> bool {
        !matches!(
            self,
            Commands::Config {
                action: Some(ConfigAction::Reset | ConfigAction::Path)
            }
        )
    }
}

/// Job description given as a file or pasted text
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct JobSource {
    /// Path to job description file (TXT, MD)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description text
    #[arg(long)]
    pub job_text: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "text" | "txt" => Ok(OutputFormat::Text),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, text, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("txt"), Ok(OutputFormat::Text));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("resume.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("resume.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("resume"), &["pdf"]).is_err());
    }

    #[test]
    fn test_analyze_requires_one_job_source() {
        let cli = Cli::try_parse_from([
            "resume-analyzer", "analyze", "--resume", "cv.pdf", "--job-text", "python developer",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { job, save, .. } => {
                assert_eq!(job.job_text.as_deref(), Some("python developer"));
                assert!(job.job.is_none());
                assert!(save.is_none());
            }
            _ => panic!("expected analyze command"),
        }

        assert!(Cli::try_parse_from(["resume-analyzer", "analyze", "--resume", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-analyzer", "analyze", "--resume", "cv.pdf", "--job", "job.txt", "--job-text", "rust",
        ])
        .is_err());
    }

    #[test]
    fn test_save_with_optional_path() {
        let cli = Cli::try_parse_from([
            "resume-analyzer", "analyze", "-r", "cv.pdf", "-j", "job.txt", "--save",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Analyze { save: Some(None), .. }));

        let cli = Cli::try_parse_from([
            "resume-analyzer", "analyze", "-r", "cv.pdf", "-j", "job.txt", "--save", "out/report.md",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { save: Some(Some(path)), .. } => assert_eq!(path, PathBuf::from("out/report.md")),
            _ => panic!("expected analyze command with a save path"),
        }
    }

    #[test]
    fn test_config_reset_and_path_skip_loading() {
        let parse = |args: &[&str]| {
            let mut argv = vec!["resume-analyzer"];
            argv.extend_from_slice(args);
            Cli::try_parse_from(argv).unwrap().command
        };

        assert!(!parse(&["--config", "bad.toml", "config", "reset"]).loads_config());
        assert!(!parse(&["config", "path"]).loads_config());
        assert!(parse(&["config", "show"]).loads_config());
        assert!(parse(&["config"]).loads_config());
        assert!(parse(&["normalize", "Python developer"]).loads_config());
    }
}
