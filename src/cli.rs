//! CLI interface for cv-match

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cv-match")]
#[command(about = "Deterministic job listing and CV matching tool")]
#[command(
    long_about = "Analyze a job listing, score a CV against its requirements, and draft a matching cover letter"
)]
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
    /// Score a CV against a job listing
    Match {
        /// Path to the job listing file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Path to the CV file (TXT, MD)
        #[arg(long)]
        cv: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file instead of stdout
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include missing preferred skills in the output
        #[arg(short, long)]
        detailed: bool,

        /// Also draft a cover letter after the report
        #[arg(long)]
        cover_letter: bool,
    },

    /// Analyze a job listing into a requirement profile
    AnalyzeJob {
        /// Path to the job listing file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,
    },

    /// Draft a cover letter from a CV and a job listing
    CoverLetter {
        /// Path to the job listing file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Path to the CV file (TXT, MD)
        #[arg(long)]
        cv: PathBuf,

        /// Save the letter to file instead of stdout
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Skill lexicon commands
    Lexicon {
        #[command(subcommand)]
        action: LexiconAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum LexiconAction {
    /// List all skills in the lexicon
    List,

    /// Show one skill and its aliases
    Info {
        /// Canonical skill id (e.g. "react", "ci-cd")
        skill: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
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
