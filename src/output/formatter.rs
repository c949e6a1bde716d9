//! Output formatters for console, JSON, plain text, markdown and HTML reports

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::{display_score, title_case, MatchReport};
use crate::processing::analyzer::MatchLevel;
use askama::Template;
use chrono::{DateTime, Local};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a match report
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured consumers
pub struct JsonFormatter {
    pretty: bool,
}

/// Plain text report suitable for download
pub struct TextFormatter;

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that dispatches to the configured formatter
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    text_formatter: TextFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Resume Analysis Report</title>
    {% if include_styles %}
    <style>
        body { font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif; background: #f8fafc; color: #0f172a; max-width: 860px; margin: 0 auto; padding: 20px; }
        .result-card { background: white; border-radius: 0.75rem; padding: 1.5rem; margin: 1rem 0; border: 1px solid #e2e8f0; box-shadow: 0 2px 8px rgba(0,0,0,0.05); }
        .score { color: white; text-align: center; padding: 2rem; border-radius: 1rem; }
        .score .value { font-size: 2.4rem; font-weight: 700; }
        .score .label { font-size: 1.4rem; margin-top: 0.5rem; }
        .metadata { color: #64748b; font-size: 0.9rem; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Resume Analysis Report</h1>
    <div class="result-card score" style="background: {{ score_color }};">
        <div class="value">{{ score }}%</div>
        <div class="label">{{ label }}</div>
    </div>

    <h2>Recommended Job Roles</h2>
    {% for role in roles %}
    <div class="result-card"><strong>{{ role.rank }}. {{ role.name }}</strong> - {{ role.score }}% alignment</div>
    {% endfor %}

    {% if has_best_role %}
    <h2>Career Insight</h2>
    <p>Your resume shows the closest alignment with <strong>{{ best_role }}</strong> roles ({{ best_score }}%).</p>
    <ul>
    {% for item in career_recommendations %}<li>{{ item }}</li>{% endfor %}
    </ul>
    {% endif %}

    <h2>Skill Gap Analysis</h2>
    {% if missing_skills.is_empty() %}
    <p>Strong technical keyword alignment detected.</p>
    {% else %}
    <p>Key competencies not strongly reflected:</p>
    <ul>
    {% for skill in missing_skills %}<li><strong>{{ skill }}</strong></li>{% endfor %}
    </ul>
    {% endif %}
    <ul>
    {% for item in gap_suggestions %}<li>{{ item }}</li>{% endfor %}
    </ul>

    <p class="metadata">Generated {{ generated_at }} by resume-analyzer v{{ version }} | Resume: {{ resume_source }} | Job: {{ job_source }}</p>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    score: String,
    label: String,
    score_color: String,
    roles: Vec<HtmlRole>,
    has_best_role: bool,
    best_role: String,
    best_score: String,
    career_recommendations: Vec<String>,
    missing_skills: Vec<String>,
    gap_suggestions: Vec<String>,
    generated_at: String,
    version: String,
    resume_source: String,
    job_source: String,
}

struct HtmlRole {
    rank: usize,
    name: String,
    score: String,
}

fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn level_color(level: MatchLevel) -> Color {
        match level {
            MatchLevel::Strong => Color::Green,
            MatchLevel::Moderate => Color::Yellow,
            MatchLevel::SignificantGaps => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;

        output.push_str(&self.format_header("RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(&report.metadata.generated_at),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Job Match Score", 2));
        let badge = format!("[{}]", summary.match_level);
        output.push_str(&format!(
            "{:.1}% {}\n",
            display_score(summary.match_score),
            self.colorize(&badge, Self::level_color(summary.match_level))
        ));

        output.push_str(&self.format_header("Recommended Job Roles", 2));
        for (i, role) in summary.top_roles.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} - {:.1}% alignment\n",
                i + 1,
                self.colorize(&role.role, Color::White),
                display_score(role.score)
            ));
        }

        if let Some(insight) = &report.career_insight {
            output.push_str(&self.format_header("Career Insight & Next Steps", 2));
            output.push_str(&format!(
                "Closest alignment: {} ({:.1}%)\n",
                self.colorize(&insight.best_role, Color::Cyan),
                display_score(insight.best_score)
            ));
            for item in &insight.recommendations {
                output.push_str(&format!("  • {}\n", item));
            }
        }

        output.push_str(&self.format_header("Skill Gap Analysis", 2));
        if report.has_gaps() {
            output.push_str("Key competencies not strongly reflected:\n");
            for skill in &report.skill_gap.missing_skills {
                output.push_str(&format!("  • {}\n", self.colorize(&title_case(skill), Color::Red)));
            }
        } else {
            output.push_str(&self.colorize("Strong technical keyword alignment detected.\n", Color::Green));
        }
        for item in &report.skill_gap.suggestions {
            output.push_str(&format!("  - {}\n", item));
        }

        if self.detailed {
            output.push_str(&self.format_header("Full Role Ranking", 3));
            for (i, role) in report.analysis.role_ranking.iter().enumerate() {
                output.push_str(&format!("  {}. {:<26} {:.2}%\n", i + 1, role.role, role.score));
            }

            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!("  Resume terms: {}\n", report.analysis.resume_token_count));
            output.push_str(&format!("  Job terms: {}\n", report.analysis.job_token_count));
            output.push_str(&format!("  Resume: {}\n", report.metadata.resume_source));
            output.push_str(&format!("  Job: {}\n", report.metadata.job_source));
        }

        if report.metadata.degraded_normalization {
            output.push_str(&self.colorize(
                "\nLinguistic analyzer unavailable: preprocessing was limited to lowercasing.\n",
                Color::Yellow,
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("AI Resume Analysis Report\n");
        output.push_str("─────────────────────────────\n");
        output.push_str(&format!("Generated: {}\n\n", format_timestamp(&report.metadata.generated_at)));
        output.push_str(&format!(
            "Job Match Score: {:.1}% - {}\n\n",
            display_score(report.summary.match_score),
            report.summary.match_level
        ));

        output.push_str("Top Role Matches:\n");
        for (i, role) in report.summary.top_roles.iter().enumerate() {
            output.push_str(&format!("{}. {:<22} {:.1}%\n", i + 1, role.role, display_score(role.score)));
        }

        output.push_str("\nSkill Gap Analysis:\n");
        if report.has_gaps() {
            output.push_str("Missing / weak areas:\n");
            let lines: Vec<String> = report
                .skill_gap
                .missing_skills
                .iter()
                .map(|skill| format!("- {}", skill))
                .collect();
            output.push_str(&lines.join("\n"));
            output.push_str("\n\nRecommendation: Add projects & quantify usage of these skills.\n");
        } else {
            output.push_str("Good keyword coverage.\nRecommendation: Emphasize impact & results.\n");
        }

        Ok(output)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Analysis Report\n\n");
        output.push_str(&format!(
            "**Job Match Score:** {:.1}% ({})\n\n",
            display_score(report.summary.match_score),
            report.summary.match_level
        ));

        output.push_str("## Recommended Job Roles\n\n");
        output.push_str("| Rank | Role | Alignment |\n|---|---|---|\n");
        for (i, role) in report.summary.top_roles.iter().enumerate() {
            output.push_str(&format!("| {} | {} | {:.1}% |\n", i + 1, role.role, display_score(role.score)));
        }
        output.push('\n');

        if let Some(insight) = &report.career_insight {
            output.push_str("## Career Insight\n\n");
            output.push_str(&format!(
                "Your resume shows the closest alignment with **{}** roles ({:.1}%).\n\n",
                insight.best_role,
                display_score(insight.best_score)
            ));
            for item in &insight.recommendations {
                output.push_str(&format!("- {}\n", item));
            }
            output.push('\n');
        }

        output.push_str("## Skill Gap Analysis\n\n");
        if report.has_gaps() {
            output.push_str("**Key competencies not strongly reflected:**\n\n");
            for skill in &report.skill_gap.missing_skills {
                output.push_str(&format!("- **{}**\n", title_case(skill)));
            }
        } else {
            output.push_str("Strong technical keyword alignment detected.\n");
        }
        output.push('\n');
        for item in &report.skill_gap.suggestions {
            output.push_str(&format!("- {}\n", item));
        }

        if self.include_metadata {
            output.push_str("\n---\n\n");
            output.push_str(&format!(
                "*Generated {} by resume-analyzer v{}. Resume: `{}`, job: `{}`.*\n",
                format_timestamp(&report.metadata.generated_at),
                report.metadata.version,
                report.metadata.resume_source,
                report.metadata.job_source
            ));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &MatchReport) -> HtmlTemplate {
        let score_color = match report.summary.match_level {
            MatchLevel::Strong => "#10b981",
            MatchLevel::Moderate => "#f59e0b",
            MatchLevel::SignificantGaps => "#ef4444",
        };

        let roles = report
            .summary
            .top_roles
            .iter()
            .enumerate()
            .map(|(i, role)| HtmlRole {
                rank: i + 1,
                name: role.role.clone(),
                score: format!("{:.1}", display_score(role.score)),
            })
            .collect();

        let (best_role, best_score, career_recommendations) = match &report.career_insight {
            Some(insight) => (
                insight.best_role.clone(),
                format!("{:.1}", display_score(insight.best_score)),
                insight.recommendations.clone(),
            ),
            None => (String::new(), String::new(), Vec::new()),
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            score: format!("{:.1}", display_score(report.summary.match_score)),
            label: report.summary.match_level.to_string(),
            score_color: score_color.to_string(),
            roles,
            has_best_role: report.career_insight.is_some(),
            best_role,
            best_score,
            career_recommendations,
            missing_skills: report.skill_gap.missing_skills.iter().map(|s| title_case(s)).collect(),
            gap_suggestions: report.skill_gap.suggestions.clone(),
            generated_at: format_timestamp(&report.metadata.generated_at),
            version: report.metadata.version.clone(),
            resume_source: report.metadata.resume_source.clone(),
            job_source: report.metadata.job_source.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let template = self.create_template_data(report);
        Ok(template.render()?)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::from_config(&OutputConfig::default())
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output, config.detailed),
            json_formatter: JsonFormatter::new(config.pretty_json),
            text_formatter: TextFormatter,
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Text => self.text_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Default download name, e.g. `resume_analysis_2024-05-01_14-30.txt`
pub fn suggest_filename(format: &OutputFormat, generated_at: &DateTime<Local>) -> String {
    let stamp = generated_at.format("%Y-%m-%d_%H-%M");
    let extension = match format {
        OutputFormat::Console | OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("resume_analysis_{}.{}", stamp, extension)
}
