//! Job profile construction: requirement classification and metadata scanning

use crate::processing::extractor::ExtractedSkill;
use crate::processing::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Scoring weight class of a requirement, decided by the section heading
/// the requirement sentence appeared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Importance {
    Required,
    Preferred,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementSkill {
    pub skill: ExtractedSkill,
    pub importance: Importance,
}

/// A raw requirement sentence kept for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementSentence {
    pub text: String,
    pub importance: Importance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    /// Empty when no title label was found; extraction is best-effort.
    pub title: String,
    pub company: Option<String>,
    /// Ordered by first appearance in the listing text.
    pub requirements: Vec<RequirementSkill>,
    pub requirement_sentences: Vec<RequirementSentence>,
}

impl JobProfile {
    pub fn required(&self) -> impl Iterator<Item = &RequirementSkill> {
        self.requirements
            .iter()
            .filter(|r| r.importance == Importance::Required)
    }

    pub fn preferred(&self) -> impl Iterator<Item = &RequirementSkill> {
        self.requirements
            .iter()
            .filter(|r| r.importance == Importance::Preferred)
    }
}

const REQUIRED_HEADINGS: &[&str] = &["requirements", "must have", "qualifications"];
const PREFERRED_HEADINGS: &[&str] = &["nice to have", "preferred", "bonus"];

const TITLE_LABELS: &[&str] = &["job title:", "title:", "position:", "role:"];
const COMPANY_LABELS: &[&str] = &["company:", "employer:", "organization:"];

pub struct JobProfileBuilder {
    tokenizer: Tokenizer,
}

impl Default for JobProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl JobProfileBuilder {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// Build a profile from the raw listing text and the skills extracted
    /// from it. Never fails; missing metadata stays empty.
    pub fn build(&self, raw: &str, skills: Vec<ExtractedSkill>) -> JobProfile {
        let mut title = String::new();
        let mut company = None;
        let mut sentences = Vec::new();
        let mut line_classes: Vec<(Range<usize>, Importance)> = Vec::new();

        let mut section: Option<Importance> = None;
        let mut offset = 0;

        for line in raw.split_inclusive('\n') {
            let range = offset..offset + line.len();
            offset += line.len();

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let lower = trimmed.to_lowercase();

            if title.is_empty() {
                if let Some(value) = scan_label(trimmed, &lower, TITLE_LABELS) {
                    title = value;
                    line_classes.push((range, section.unwrap_or(Importance::Preferred)));
                    continue;
                }
            }
            if company.is_none() {
                if let Some(value) = scan_label(trimmed, &lower, COMPANY_LABELS) {
                    company = Some(value);
                    line_classes.push((range, section.unwrap_or(Importance::Preferred)));
                    continue;
                }
            }

            if let Some(importance) = classify_heading(&lower) {
                section = Some(importance);
                line_classes.push((range, importance));
                continue;
            }
            if is_generic_heading(trimmed, &lower) {
                section = None;
                line_classes.push((range, Importance::Preferred));
                continue;
            }

            let importance = section.unwrap_or(Importance::Preferred);
            line_classes.push((range, importance));
            sentences.push(RequirementSentence {
                text: self.tokenizer.strip_bullet(trimmed).to_string(),
                importance,
            });
        }

        let requirements = skills
            .into_iter()
            .map(|skill| {
                let importance = if skill
                    .spans
                    .iter()
                    .any(|&(start, _)| class_at(&line_classes, start) == Importance::Required)
                {
                    Importance::Required
                } else {
                    Importance::Preferred
                };
                RequirementSkill { skill, importance }
            })
            .collect();

        JobProfile {
            title,
            company,
            requirements,
            requirement_sentences: sentences,
        }
    }
}

fn scan_label(trimmed: &str, lower: &str, labels: &[&str]) -> Option<String> {
    for label in labels {
        if lower.starts_with(label) {
            let value = trimmed[label.len()..].trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Recognize a required/preferred section heading. Preferred keywords are
/// checked first: "Preferred Qualifications" must land on Preferred even
/// though it also contains a required keyword.
fn classify_heading(lower: &str) -> Option<Importance> {
    if lower.len() > 80 {
        return None;
    }
    let word_count = lower.split_whitespace().count();
    if !lower.ends_with(':') && word_count > 4 {
        return None;
    }

    if PREFERRED_HEADINGS.iter().any(|h| lower.contains(h)) {
        return Some(Importance::Preferred);
    }
    if REQUIRED_HEADINGS.iter().any(|h| lower.contains(h)) {
        return Some(Importance::Required);
    }
    None
}

/// A short colon-terminated line that is not a recognized section heading
/// ends the current section ("Responsibilities:", "About us:").
fn is_generic_heading(trimmed: &str, lower: &str) -> bool {
    trimmed.ends_with(':') && lower.split_whitespace().count() <= 6
}

fn class_at(line_classes: &[(Range<usize>, Importance)], pos: usize) -> Importance {
    line_classes
        .iter()
        .find(|(range, _)| range.contains(&pos))
        .map(|&(_, importance)| importance)
        .unwrap_or(Importance::Preferred)
}
