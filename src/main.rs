//! cv-match: deterministic job listing and CV matching tool

mod cli;
mod config;
mod error;
mod input;
mod processing;
mod output;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, LexiconAction};
use config::Config;
use error::{CvMatchError, Result};
use input::manager::InputManager;
use log::{error, info};
use output::formatter::ReportGenerator;
use output::report::MatchReportEnvelope;
use processing::engine::Engine;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            job,
            cv,
            output,
            save,
            detailed,
            cover_letter,
        } => {
            let mut config = config;
            config.output.detailed = config.output.detailed || detailed;
            cmd_match(&config, &job, &cv, &output, save.as_deref(), cover_letter).await
        }
        Commands::AnalyzeJob { job } => cmd_analyze_job(&config, &job).await,
        Commands::CoverLetter { job, cv, save } => {
            cmd_cover_letter(&config, &job, &cv, save.as_deref()).await
        }
        Commands::Lexicon { action } => cmd_lexicon(&config, action),
        Commands::Config { action } => cmd_config(&config, action),
    }
}

async fn cmd_match(
    config: &Config,
    job_path: &PathBuf,
    cv_path: &PathBuf,
    output: &str,
    save: Option<&Path>,
    cover_letter: bool,
) -> Result<()> {
    info!("Starting CV match analysis");

    cli::validate_file_extension(job_path, &["txt", "md"])
        .map_err(|e| CvMatchError::InvalidInput(format!("Job listing file: {}", e)))?;
    cli::validate_file_extension(cv_path, &["txt", "md"])
        .map_err(|e| CvMatchError::InvalidInput(format!("CV file: {}", e)))?;

    let output_format = cli::parse_output_format(output).map_err(CvMatchError::InvalidInput)?;

    let mut input_manager = InputManager::new();
    info!("Reading job listing: {}", job_path.display());
    let job_text = input_manager.extract_text(job_path).await?;
    info!("Reading CV: {}", cv_path.display());
    let cv_text = input_manager.extract_text(cv_path).await?;

    let engine = Engine::new(config)?;
    let started = Instant::now();

    let job_profile = engine.analyze_job(&job_text)?;
    let cv_profile = engine.analyze_cv(&cv_text)?;
    let report = engine.score_profiles(&cv_profile, &job_profile);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let envelope = MatchReportEnvelope::new(
        &job_profile,
        &cv_profile,
        report,
        job_path.to_string_lossy().to_string(),
        cv_path.to_string_lossy().to_string(),
        elapsed_ms,
        engine.lexicon().len(),
    );

    let generator = ReportGenerator::from_config(config);
    let rendered = generator.format_report(&envelope, &output_format)?;
    generator.write_report(&rendered, save)?;

    if let Some(path) = save {
        println!("📊 Report saved to {}", path.display());
    }

    if cover_letter {
        let letter = engine.draft_cover_letter(Some(&cv_profile), Some(&job_profile))?;
        println!("\n✉️  Cover Letter\n");
        println!("{}", letter);
    }

    Ok(())
}

async fn cmd_analyze_job(config: &Config, job_path: &PathBuf) -> Result<()> {
    cli::validate_file_extension(job_path, &["txt", "md"])
        .map_err(|e| CvMatchError::InvalidInput(format!("Job listing file: {}", e)))?;

    let mut input_manager = InputManager::new();
    let job_text = input_manager.extract_text(job_path).await?;

    let engine = Engine::new(config)?;
    let profile = engine.analyze_job(&job_text)?;

    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

async fn cmd_cover_letter(
    config: &Config,
    job_path: &PathBuf,
    cv_path: &PathBuf,
    save: Option<&Path>,
) -> Result<()> {
    cli::validate_file_extension(job_path, &["txt", "md"])
        .map_err(|e| CvMatchError::InvalidInput(format!("Job listing file: {}", e)))?;
    cli::validate_file_extension(cv_path, &["txt", "md"])
        .map_err(|e| CvMatchError::InvalidInput(format!("CV file: {}", e)))?;

    let mut input_manager = InputManager::new();
    let job_text = input_manager.extract_text(job_path).await?;
    let cv_text = input_manager.extract_text(cv_path).await?;

    let engine = Engine::new(config)?;
    let job_profile = engine.analyze_job(&job_text)?;
    let cv_profile = engine.analyze_cv(&cv_text)?;
    let letter = engine.draft_cover_letter(Some(&cv_profile), Some(&job_profile))?;

    match save {
        Some(path) => {
            std::fs::write(path, &letter)?;
            println!("✉️  Cover letter saved to {}", path.display());
        }
        None => println!("{}", letter),
    }
    Ok(())
}

fn cmd_lexicon(config: &Config, action: LexiconAction) -> Result<()> {
    let engine = Engine::new(config)?;
    let lexicon = engine.lexicon();

    match action {
        LexiconAction::List => {
            println!(
                "Skill lexicon v{} ({} skills)\n",
                lexicon.version(),
                lexicon.len()
            );
            for term in lexicon.terms() {
                println!("  {:<20} {} ({} aliases)", term.id, term.label, term.aliases.len());
            }
        }
        LexiconAction::Info { skill } => match lexicon.get(&skill) {
            Some(term) => {
                println!("{} ({})", term.label, term.id);
                println!("Aliases: {}", term.aliases.join(", "));
            }
            None => {
                return Err(CvMatchError::InvalidInput(format!(
                    "Unknown skill id: {}",
                    skill
                )));
            }
        },
    }
    Ok(())
}

fn cmd_config(config: &Config, action: Option<ConfigAction>) -> Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            println!("Configuration file: {}", Config::config_path().display());
            let content = toml::to_string_pretty(config)
                .map_err(|e| CvMatchError::Configuration(e.to_string()))?;
            println!("{}", content);
        }
        ConfigAction::Reset => {
            let defaults = Config::default();
            defaults.save()?;
            println!("Configuration reset to defaults");
        }
    }
    Ok(())
}
