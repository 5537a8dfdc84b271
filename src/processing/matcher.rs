//! Weighted skill-overlap scoring between a job profile and a CV

use crate::config::MatchingConfig;
use crate::processing::cv_profile::CvProfile;
use crate::processing::job_profile::{Importance, JobProfile};
use serde::{Deserialize, Serialize};

/// A skill named in a report, detached from extraction detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRef {
    pub id: String,
    pub label: String,
}

/// A proposed rewrite of one CV bullet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub before: String,
    pub after: String,
    pub reason: String,
}

/// The scoring result handed back to the caller.
///
/// `matched_skills` and `missing_skills` keep the order the requirements
/// appeared in the job text. `missing_skills` only ever contains required
/// skills; preferred gaps are tracked separately and never penalize the
/// score beyond their weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: u8,
    pub matched_skills: Vec<SkillRef>,
    pub missing_skills: Vec<SkillRef>,
    pub missing_preferred: Vec<SkillRef>,
    pub suggestions: Vec<Suggestion>,
}

pub struct Matcher {
    required_weight: f32,
    preferred_weight: f32,
}

impl Matcher {
    pub fn from_config(config: &MatchingConfig) -> Self {
        Self {
            required_weight: config.required_weight,
            preferred_weight: config.preferred_weight,
        }
    }

    /// Score a CV against a job profile.
    ///
    /// coverage = (|R∩C|·w_req + |P∩C|·w_pref) / (|R|·w_req + |P|·w_pref),
    /// defined as 1.0 when the job has nothing to match against. The score
    /// is the coverage rounded to an integer percentage.
    pub fn score(&self, job: &JobProfile, cv: &CvProfile) -> MatchReport {
        let mut matched = Vec::new();
        let mut missing = Vec::new();
        let mut missing_preferred = Vec::new();

        let mut required_total = 0usize;
        let mut required_hit = 0usize;
        let mut preferred_total = 0usize;
        let mut preferred_hit = 0usize;

        for requirement in &job.requirements {
            let skill_ref = SkillRef {
                id: requirement.skill.id.clone(),
                label: requirement.skill.label.clone(),
            };
            let hit = cv.has_skill(&requirement.skill.id);

            match requirement.importance {
                Importance::Required => {
                    required_total += 1;
                    if hit {
                        required_hit += 1;
                    } else {
                        missing.push(skill_ref.clone());
                    }
                }
                Importance::Preferred => {
                    preferred_total += 1;
                    if hit {
                        preferred_hit += 1;
                    } else {
                        missing_preferred.push(skill_ref.clone());
                    }
                }
            }
            if hit {
                matched.push(skill_ref);
            }
        }

        let denominator = required_total as f32 * self.required_weight
            + preferred_total as f32 * self.preferred_weight;
        let coverage = if denominator <= f32::EPSILON {
            1.0
        } else {
            (required_hit as f32 * self.required_weight
                + preferred_hit as f32 * self.preferred_weight)
                / denominator
        };

        let score = (coverage * 100.0).round().clamp(0.0, 100.0) as u8;

        MatchReport {
            score,
            matched_skills: matched,
            missing_skills: missing,
            missing_preferred,
            suggestions: Vec::new(),
        }
    }
}
