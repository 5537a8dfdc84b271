//! Report envelope: the engine's match report plus run metadata

use crate::processing::cv_profile::CvProfile;
use crate::processing::job_profile::{Importance, JobProfile};
use crate::processing::matcher::MatchReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a formatter needs to render one match run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReportEnvelope {
    pub job: JobSummary,
    pub cv: CvSummary,
    pub report: MatchReport,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub path: String,
    pub title: String,
    pub company: Option<String>,
    pub required_skills: usize,
    pub preferred_skills: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvSummary {
    pub path: String,
    pub candidate_name: Option<String>,
    pub skills_found: usize,
    pub bullets_found: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub lexicon_skills: usize,
    pub engine_version: String,
}

impl MatchReportEnvelope {
    pub fn new(
        job: &JobProfile,
        cv: &CvProfile,
        report: MatchReport,
        job_path: String,
        cv_path: String,
        processing_time_ms: u64,
        lexicon_skills: usize,
    ) -> Self {
        let required_skills = job
            .requirements
            .iter()
            .filter(|r| r.importance == Importance::Required)
            .count();

        Self {
            job: JobSummary {
                path: job_path,
                title: job.title.clone(),
                company: job.company.clone(),
                required_skills,
                preferred_skills: job.requirements.len() - required_skills,
            },
            cv: CvSummary {
                path: cv_path,
                candidate_name: cv.candidate_name.clone(),
                skills_found: cv.skills.len(),
                bullets_found: cv.bullets.len(),
            },
            report,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                processing_time_ms,
                lexicon_skills,
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// One-line verdict for the score band.
    pub fn verdict(&self) -> &'static str {
        match self.report.score {
            80..=100 => "Excellent match! You're a strong candidate for this position.",
            60..=79 => "Good match. With some improvements, you could be a strong candidate.",
            _ => "Needs improvement. Consider addressing the missing skills and suggestions below.",
        }
    }
}
