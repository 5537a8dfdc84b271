//! Rewrite suggestions for missing required skills

use crate::config::SuggestionConfig;
use crate::processing::cv_profile::CvProfile;
use crate::processing::matcher::{SkillRef, Suggestion};
use crate::processing::tokenizer::Tokenizer;
use std::collections::HashSet;

pub struct SuggestionGenerator {
    max_suggestions: usize,
    similarity_floor: f32,
    tokenizer: Tokenizer,
}

impl SuggestionGenerator {
    pub fn from_config(config: &SuggestionConfig) -> Self {
        Self {
            max_suggestions: config.max_suggestions,
            similarity_floor: config.similarity_floor,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Propose one rewrite per missing required skill, in job order, capped
    /// at the configured maximum.
    ///
    /// The bullet with the highest token overlap against the skill label is
    /// rewritten to name the skill; when nothing comes close, the
    /// suggestion directs adding a new bullet instead. Best-effort text
    /// generation: the guarantees are structural, not stylistic.
    pub fn suggest(&self, missing_required: &[SkillRef], cv: &CvProfile) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for skill in missing_required {
            if suggestions.len() >= self.max_suggestions {
                break;
            }

            match self.best_bullet(&skill.label, cv) {
                Some(bullet) => suggestions.push(Suggestion {
                    before: bullet.to_string(),
                    after: splice_label(bullet, &skill.label),
                    reason: format!(
                        "Names \"{}\", a required skill the listing asks for and this bullet almost covers",
                        skill.label
                    ),
                }),
                None => suggestions.push(Suggestion {
                    before: "Add a new bullet".to_string(),
                    after: format!(
                        "Hands-on experience with {}, applied in a recent project.",
                        skill.label
                    ),
                    reason: format!(
                        "No existing bullet comes close to \"{}\"; add dedicated evidence for it",
                        skill.label
                    ),
                }),
            }
        }

        suggestions
    }

    /// The bullet most lexically similar to the skill label, if any clears
    /// the similarity floor. Ties keep the earlier bullet.
    fn best_bullet<'a>(&self, label: &str, cv: &'a CvProfile) -> Option<&'a str> {
        let label_tokens: HashSet<String> = self
            .tokenizer
            .normalize(label)
            .into_iter()
            .map(|t| t.text)
            .collect();
        if label_tokens.is_empty() {
            return None;
        }

        let mut best: Option<(f32, &str)> = None;
        for bullet in &cv.bullets {
            let bullet_tokens: HashSet<String> = self
                .tokenizer
                .normalize(&bullet.text)
                .into_iter()
                .map(|t| t.text)
                .collect();

            let overlap = label_tokens.intersection(&bullet_tokens).count();
            let ratio = overlap as f32 / label_tokens.len() as f32;

            if ratio >= self.similarity_floor {
                best = match best {
                    Some((b, _)) if b >= ratio => best,
                    _ => Some((ratio, bullet.text.as_str())),
                };
            }
        }

        best.map(|(_, text)| text)
    }
}

/// Splice the canonical label into an existing sentence, keeping its
/// terminal punctuation.
fn splice_label(bullet: &str, label: &str) -> String {
    let trimmed = bullet.trim_end();
    match trimmed.strip_suffix(&['.', '!', '?'][..]) {
        Some(body) => format!("{}, working with {}.", body.trim_end(), label),
        None => format!("{}, working with {}", trimmed, label),
    }
}
