//! CV profile construction: bullet sentences, skill tags, candidate name

use crate::processing::extractor::ExtractedSkill;
use crate::processing::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};

/// A CV bullet sentence with the skill ids it mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvBullet {
    pub text: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvProfile {
    pub candidate_name: Option<String>,
    /// Every skill found anywhere in the document, first-occurrence order.
    pub skills: Vec<ExtractedSkill>,
    pub bullets: Vec<CvBullet>,
}

impl CvProfile {
    pub fn has_skill(&self, id: &str) -> bool {
        self.skills.iter().any(|s| s.id == id)
    }
}

/// Content lines shorter than this are treated as headings or noise, not
/// as rewritable bullet sentences.
const MIN_BULLET_CHARS: usize = 12;

pub struct CvProfileBuilder {
    tokenizer: Tokenizer,
}

impl Default for CvProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CvProfileBuilder {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// Build a profile from raw CV text and the skills extracted from it.
    /// Never fails; a CV with no recognizable bullets or name is valid.
    pub fn build(&self, raw: &str, skills: Vec<ExtractedSkill>) -> CvProfile {
        let candidate_name = detect_name(raw);
        let mut bullets = Vec::new();

        let mut offset = 0;
        for line in raw.split_inclusive('\n') {
            let range_start = offset;
            let range_end = offset + line.len();
            offset = range_end;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.ends_with(':') {
                continue;
            }

            let text = self.tokenizer.strip_bullet(trimmed);
            if text.chars().count() < MIN_BULLET_CHARS {
                continue;
            }

            let mentioned: Vec<String> = skills
                .iter()
                .filter(|skill| {
                    skill
                        .spans
                        .iter()
                        .any(|&(start, end)| start < range_end && end > range_start)
                })
                .map(|skill| skill.id.clone())
                .collect();

            bullets.push(CvBullet {
                text: text.to_string(),
                skills: mentioned,
            });
        }

        CvProfile {
            candidate_name,
            skills,
            bullets,
        }
    }
}

/// Best-effort name detection: the first short, label-free line near the
/// top of the document.
fn detect_name(raw: &str) -> Option<String> {
    for line in raw.lines().take(5) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let word_count = trimmed.split_whitespace().count();
        if trimmed.len() >= 3
            && trimmed.len() <= 60
            && word_count <= 5
            && !trimmed.contains('@')
            && !trimmed.contains(':')
            && !trimmed.starts_with('-')
            && !trimmed.chars().any(|c| c.is_ascii_digit())
        {
            return Some(trimmed.to_string());
        }
    }
    None
}
