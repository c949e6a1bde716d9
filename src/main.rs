//! Resume analyzer: resume and job description match scoring tool

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, JobSource};
use resume_analyzer::config::Config;
use resume_analyzer::input::InputManager;
use resume_analyzer::output::{save_report_to_file, suggest_filename, MatchReport, ReportGenerator};
use resume_analyzer::processing::{LinguisticBackend, Normalizer};
use resume_analyzer::AnalysisEngine;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let loaded = match &cli.config {
        _ if !cli.command.loads_config() => Ok(Config::default()),
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_file: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
            top,
            detailed,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(anyhow::Error::msg)
                .context("Resume file")?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };
            if let Some(top) = top {
                config.scoring.top_roles = top;
            }
            config.output.detailed |= detailed;

            info!("Starting resume analysis");
            let spinner = spinner("Extracting text...");
            let input_manager = InputManager::new();

            let resume_text = read_resume(&input_manager, &resume).await;
            let (job_text, job_source) = read_job(&input_manager, job).await?;

            spinner.set_message("Analyzing...");
            let engine = AnalysisEngine::new(&config);
            let analysis = engine.analyze(&resume_text, &job_text);
            spinner.finish_and_clear();

            let report = MatchReport::new(analysis, &resume.display().to_string(), &job_source);
            let generator = ReportGenerator::from_config(&config.output);
            let content = generator
                .generate_report(&report, &output_format)
                .context("Failed to format report")?;

            match save {
                Some(target) => {
                    let path = target.unwrap_or_else(|| {
                        PathBuf::from(suggest_filename(&output_format, &report.metadata.generated_at))
                    });
                    save_report_to_file(&content, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Roles { resume, top } => {
            if let Some(top) = top {
                config.scoring.top_roles = top;
            }

            let input_manager = InputManager::new();
            let resume_text = read_resume(&input_manager, &resume).await;

            let engine = AnalysisEngine::new(&config);
            let roles = engine.suggest_roles(&resume_text);

            println!("Recommended job roles for {}:", resume.display());
            for (i, role) in roles.iter().enumerate() {
                println!("  {}. {:<26} {:.2}%", i + 1, role.role, role.score);
            }
        }

        Commands::Normalize { text, degraded } => {
            let backend = if degraded {
                LinguisticBackend::unavailable("disabled on the command line")
            } else {
                LinguisticBackend::load(&config.analyzer)
            };
            println!("{}", Normalizer::new(&backend).normalize(&text));
        }

        Commands::Config { action } => {
            let config_path = config_file.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
                    println!("# {}", config_path.display());
                    println!("{}", content);
                }
                Some(ConfigAction::Reset) => {
                    Config::default()
                        .save_to(&config_path)
                        .with_context(|| format!("Failed to write {}", config_path.display()))?;
                    println!("Configuration reset to defaults: {}", config_path.display());
                }
                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
            }
        }
    }

    Ok(())
}

/// Resume extraction failures degrade to an empty document
async fn read_resume(input_manager: &InputManager, path: &Path) -> String {
    input_manager.extract(path).await.into_text()
}

async fn read_job(input_manager: &InputManager, job: JobSource) -> Result<(String, String)> {
    match (job.job, job.job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(&path, &["txt", "md"])
                .map_err(anyhow::Error::msg)
                .context("Job description file")?;
            let text = input_manager
                .extract_text(&path)
                .await
                .with_context(|| format!("Failed to read job description {}", path.display()))?;
            Ok((text, path.display().to_string()))
        }
        (None, Some(text)) => Ok((text, "pasted text".to_string())),
        (None, None) => bail!("A job description is required (--job or --job-text)"),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
