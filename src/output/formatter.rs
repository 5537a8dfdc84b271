//! Output formatters: colored console, JSON, and Markdown

use crate::config::{Config, OutputFormat};
use crate::error::{CvMatchError, Result};
use crate::output::report::MatchReportEnvelope;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a report envelope into one output format.
pub trait OutputFormatter {
    fn format_report(&self, envelope: &MatchReportEnvelope) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Coordinates the formatters and writes the result to stdout or a file.
pub struct ReportGenerator {
    console: ConsoleFormatter,
    json: JsonFormatter,
    markdown: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn score_color(score: u8) -> Color {
        match score {
            80..=100 => Color::Green,
            60..=79 => Color::Yellow,
            _ => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, envelope: &MatchReportEnvelope) -> Result<String> {
        let mut output = String::new();
        let report = &envelope.report;

        output.push_str(&self.colorize("CV Match Report\n", Color::Cyan));
        output.push_str(&self.colorize("===============\n\n", Color::Cyan));

        let title = if envelope.job.title.is_empty() {
            "(no title detected)"
        } else {
            envelope.job.title.as_str()
        };
        output.push_str(&format!("💼 Job: {}", title));
        if let Some(company) = &envelope.job.company {
            output.push_str(&format!(" at {}", company));
        }
        output.push_str(&format!(" ({})\n", envelope.job.path));

        output.push_str(&format!(
            "📄 CV: {} ({})\n\n",
            envelope.cv.candidate_name.as_deref().unwrap_or("(no name detected)"),
            envelope.cv.path
        ));

        let score_text = format!("{}%", report.score);
        output.push_str(&format!(
            "Match Score: {}\n",
            self.colorize(&score_text, Self::score_color(report.score))
        ));
        output.push_str(&format!("{}\n\n", envelope.verdict()));

        output.push_str(&format!("✅ Matched Skills ({})\n", report.matched_skills.len()));
        for skill in &report.matched_skills {
            output.push_str(&format!("  ✓ {}\n", self.colorize(&skill.label, Color::Green)));
        }
        output.push('\n');

        output.push_str(&format!(
            "❌ Missing Required Skills ({})\n",
            report.missing_skills.len()
        ));
        for skill in &report.missing_skills {
            output.push_str(&format!("  ✗ {}\n", self.colorize(&skill.label, Color::Red)));
        }
        output.push('\n');

        if self.detailed && !report.missing_preferred.is_empty() {
            output.push_str(&format!(
                "Missing Preferred Skills ({})\n",
                report.missing_preferred.len()
            ));
            for skill in &report.missing_preferred {
                output.push_str(&format!(
                    "  • {}\n",
                    self.colorize(&skill.label, Color::Yellow)
                ));
            }
            output.push('\n');
        }

        if !report.suggestions.is_empty() {
            output.push_str("💡 Improvement Suggestions\n");
            for (i, suggestion) in report.suggestions.iter().enumerate() {
                output.push_str(&format!("{}. Before: {}\n", i + 1, suggestion.before));
                output.push_str(&format!(
                    "   After:  {}\n",
                    self.colorize(&suggestion.after, Color::Green)
                ));
                output.push_str(&format!(
                    "   Why:    {}\n\n",
                    self.colorize(&suggestion.reason, Color::BrightBlack)
                ));
            }
        }

        output.push_str(&format!(
            "Generated {} | cv-match v{} | {} lexicon skills | {} ms\n",
            envelope.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            envelope.metadata.engine_version,
            envelope.metadata.lexicon_skills,
            envelope.metadata.processing_time_ms
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, envelope: &MatchReportEnvelope) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(envelope)?
        } else {
            serde_json::to_string(envelope)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, envelope: &MatchReportEnvelope) -> Result<String> {
        let mut output = String::new();
        let report = &envelope.report;

        output.push_str("# CV Match Report\n\n");

        let title = if envelope.job.title.is_empty() {
            "_no title detected_"
        } else {
            envelope.job.title.as_str()
        };
        output.push_str(&format!("**Job:** {}", title));
        if let Some(company) = &envelope.job.company {
            output.push_str(&format!(" at {}", company));
        }
        output.push('\n');
        output.push_str(&format!(
            "**Candidate:** {}\n\n",
            envelope.cv.candidate_name.as_deref().unwrap_or("_no name detected_")
        ));

        output.push_str(&format!("## Match Score: {}%\n\n", report.score));
        output.push_str(&format!("{}\n\n", envelope.verdict()));

        output.push_str("## Matched Skills\n\n");
        if report.matched_skills.is_empty() {
            output.push_str("_none_\n");
        }
        for skill in &report.matched_skills {
            output.push_str(&format!("- ✅ {}\n", skill.label));
        }
        output.push('\n');

        output.push_str("## Missing Required Skills\n\n");
        if report.missing_skills.is_empty() {
            output.push_str("_none_\n");
        }
        for skill in &report.missing_skills {
            output.push_str(&format!("- ❌ {}\n", skill.label));
        }
        output.push('\n');

        if !report.missing_preferred.is_empty() {
            output.push_str("## Missing Preferred Skills\n\n");
            for skill in &report.missing_preferred {
                output.push_str(&format!("- {}\n", skill.label));
            }
            output.push('\n');
        }

        if !report.suggestions.is_empty() {
            output.push_str("## Improvement Suggestions\n\n");
            for suggestion in &report.suggestions {
                output.push_str(&format!("**Before:** {}\n\n", suggestion.before));
                output.push_str(&format!("**After:** {}\n\n", suggestion.after));
                output.push_str(&format!("_{}_\n\n", suggestion.reason));
                output.push_str("---\n\n");
            }
        }

        if self.include_metadata {
            output.push_str(&format!(
                "_Generated {} by cv-match v{} ({} lexicon skills, {} ms)_\n",
                envelope.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                envelope.metadata.engine_version,
                envelope.metadata.lexicon_skills,
                envelope.metadata.processing_time_ms
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            console: ConsoleFormatter::new(config.output.color_output, config.output.detailed),
            json: JsonFormatter::new(true),
            markdown: MarkdownFormatter::new(true),
        }
    }

    pub fn format_report(
        &self,
        envelope: &MatchReportEnvelope,
        format: &OutputFormat,
    ) -> Result<String> {
        match format {
            OutputFormat::Console => self.console.format_report(envelope),
            OutputFormat::Json => self.json.format_report(envelope),
            OutputFormat::Markdown => self.markdown.format_report(envelope),
        }
    }

    /// Print to stdout, or write to the given path.
    pub fn write_report(&self, rendered: &str, save: Option<&Path>) -> Result<()> {
        match save {
            Some(path) => {
                std::fs::write(path, rendered).map_err(|e| {
                    CvMatchError::OutputFormatting(format!(
                        "cannot write report to {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            }
            None => println!("{}", rendered),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::cv_profile::CvProfile;
    use crate::processing::job_profile::JobProfile;
    use crate::processing::matcher::{MatchReport, SkillRef, Suggestion};

    fn envelope() -> MatchReportEnvelope {
        let job = JobProfile {
            title: "Senior Frontend Developer".to_string(),
            company: Some("TechInnovate Solutions".to_string()),
            requirements: Vec::new(),
            requirement_sentences: Vec::new(),
        };
        let cv = CvProfile {
            candidate_name: Some("John Doe".to_string()),
            skills: Vec::new(),
            bullets: Vec::new(),
        };
        let report = MatchReport {
            score: 67,
            matched_skills: vec![SkillRef {
                id: "react".to_string(),
                label: "React".to_string(),
            }],
            missing_skills: vec![SkillRef {
                id: "ci-cd".to_string(),
                label: "CI/CD".to_string(),
            }],
            missing_preferred: Vec::new(),
            suggestions: vec![Suggestion {
                before: "Add a new bullet".to_string(),
                after: "Hands-on experience with CI/CD.".to_string(),
                reason: "No existing bullet comes close".to_string(),
            }],
        };
        MatchReportEnvelope::new(&job, &cv, report, "job.txt".into(), "cv.txt".into(), 2, 80)
    }

    #[test]
    fn test_console_format_sections() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_report(&envelope()).unwrap();

        assert!(output.contains("Match Score: 67%"));
        assert!(output.contains("React"));
        assert!(output.contains("CI/CD"));
        assert!(output.contains("John Doe"));
        assert!(output.contains("Improvement Suggestions"));
    }

    #[test]
    fn test_json_format_parses_back() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_report(&envelope()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["report"]["score"], 67);
        assert_eq!(value["job"]["title"], "Senior Frontend Developer");
    }

    #[test]
    fn test_markdown_format_headers() {
        let formatter = MarkdownFormatter::new(true);
        let output = formatter.format_report(&envelope()).unwrap();

        assert!(output.starts_with("# CV Match Report"));
        assert!(output.contains("## Match Score: 67%"));
        assert!(output.contains("- ✅ React"));
        assert!(output.contains("- ❌ CI/CD"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::from_config(&Config::default());
        let env = envelope();

        assert!(generator.format_report(&env, &OutputFormat::Console).is_ok());
        assert!(generator.format_report(&env, &OutputFormat::Json).is_ok());
        assert!(generator.format_report(&env, &OutputFormat::Markdown).is_ok());
    }
}
