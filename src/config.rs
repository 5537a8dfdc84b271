//! Configuration management for cv-match

use crate::error::{CvMatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub suggestions: SuggestionConfig,
    pub output: OutputConfig,
    pub lexicon: LexiconConfig,
}

/// Weights and thresholds for skill extraction and scoring.
///
/// These are deliberately configuration rather than constants: the
/// required/preferred weighting and the fuzzy-matching strategy are tuning
/// knobs, not fixed product behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub required_weight: f32,
    pub preferred_weight: f32,
    pub fuzzy_max_edit_distance: usize,
    pub fuzzy_confidence: f32,
    pub fuzzy_min_token_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    pub max_suggestions: usize,
    pub similarity_floor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

/// Where the skill lexicon comes from. `None` uses the table embedded in
/// the binary; a path points at a user-maintained TOML table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig {
                required_weight: 1.0,
                preferred_weight: 0.4,
                fuzzy_max_edit_distance: 1,
                fuzzy_confidence: 0.6,
                fuzzy_min_token_len: 4,
            },
            suggestions: SuggestionConfig {
                max_suggestions: 5,
                similarity_floor: 0.1,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
            lexicon: LexiconConfig { path: None },
        }
    }
}

impl Config {
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

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CvMatchError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CvMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-match")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let config = Config::default();
        assert_eq!(config.matching.required_weight, 1.0);
        assert_eq!(config.matching.preferred_weight, 0.4);
        assert_eq!(config.matching.fuzzy_max_edit_distance, 1);
        assert_eq!(config.suggestions.max_suggestions, 5);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.matching.preferred_weight, config.matching.preferred_weight);
        assert_eq!(parsed.output.format, OutputFormat::Console);
        assert!(parsed.lexicon.path.is_none());
    }
}
