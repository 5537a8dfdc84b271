//! Skill lexicon: canonical skill identifiers and their surface-form aliases
//!
//! The lexicon is a versioned, data-driven TOML table rather than code, so
//! skill knowledge can change without touching matching logic. It is loaded
//! once at process start and read-only afterwards; a load failure is fatal.

use crate::config::LexiconConfig;
use crate::error::{CvMatchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// The default table compiled into the binary.
const EMBEDDED_LEXICON: &str = include_str!("../../data/skills.toml");

/// A canonical skill: stable identifier, display label, and the surface
/// forms it is recognized under. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTerm {
    pub id: String,
    pub label: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    version: u32,
    skills: Vec<SkillTerm>,
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    version: u32,
    terms: Vec<SkillTerm>,
    by_id: HashMap<String, usize>,
}

impl Lexicon {
    /// Load per configuration: a user-supplied table if a path is set,
    /// otherwise the embedded default.
    pub fn load(config: &LexiconConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_LEXICON, "<embedded>")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CvMatchError::LexiconLoad(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(content: &str, source: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content)
            .map_err(|e| CvMatchError::LexiconLoad(format!("{}: {}", source, e)))?;

        if file.skills.is_empty() {
            return Err(CvMatchError::LexiconLoad(format!(
                "{}: lexicon contains no skills",
                source
            )));
        }

        let mut by_id = HashMap::new();
        for (idx, term) in file.skills.iter().enumerate() {
            if term.id.is_empty() {
                return Err(CvMatchError::LexiconLoad(format!(
                    "{}: skill at index {} has an empty id",
                    source, idx
                )));
            }
            if term.aliases.is_empty() {
                return Err(CvMatchError::LexiconLoad(format!(
                    "{}: skill '{}' has no aliases",
                    source, term.id
                )));
            }
            if by_id.insert(term.id.clone(), idx).is_some() {
                return Err(CvMatchError::LexiconLoad(format!(
                    "{}: duplicate skill id '{}'",
                    source, term.id
                )));
            }
        }

        Ok(Self {
            version: file.version,
            terms: file.skills,
            by_id,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn terms(&self) -> &[SkillTerm] {
        &self.terms
    }

    pub fn get(&self, id: &str) -> Option<&SkillTerm> {
        self.by_id.get(id).map(|&idx| &self.terms[idx])
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_lexicon_loads() {
        let lexicon = Lexicon::embedded().unwrap();
        assert!(lexicon.len() > 50);
        assert!(lexicon.version() >= 1);
    }

    #[test]
    fn test_lookup_by_id() {
        let lexicon = Lexicon::embedded().unwrap();

        let react = lexicon.get("react").unwrap();
        assert_eq!(react.label, "React");
        assert!(react.aliases.iter().any(|a| a == "react"));

        let cicd = lexicon.get("ci-cd").unwrap();
        assert!(cicd.aliases.iter().any(|a| a == "ci/cd"));

        assert!(lexicon.get("underwater-basket-weaving").is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let table = r#"
version = 1

[[skills]]
id = "react"
label = "React"
aliases = ["react"]

[[skills]]
id = "react"
label = "React again"
aliases = ["reactjs"]
"#;
        let err = Lexicon::parse(table, "<test>").unwrap_err();
        assert!(matches!(err, CvMatchError::LexiconLoad(_)));
    }

    #[test]
    fn test_rejects_empty_aliases() {
        let table = r#"
version = 1

[[skills]]
id = "react"
label = "React"
aliases = []
"#;
        assert!(Lexicon::parse(table, "<test>").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Lexicon::parse("not toml {{{", "<test>").is_err());
    }
}
