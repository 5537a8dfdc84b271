//! The engine façade wiring the pipeline together
//!
//! A pure, synchronous computation pipeline: one invocation, no shared
//! mutable state between calls. The lexicon is loaded once at construction
//! and read-only afterwards, so a single `Engine` can serve concurrent
//! callers through `&self` without coordination.

use crate::config::Config;
use crate::error::{CvMatchError, InputKind, Result};
use crate::processing::cover_letter::CoverLetterDrafter;
use crate::processing::cv_profile::{CvProfile, CvProfileBuilder};
use crate::processing::extractor::SkillExtractor;
use crate::processing::job_profile::{JobProfile, JobProfileBuilder};
use crate::processing::lexicon::Lexicon;
use crate::processing::matcher::{MatchReport, Matcher};
use crate::processing::suggestions::SuggestionGenerator;
use crate::processing::tokenizer::Tokenizer;
use log::{debug, error};

/// Minimum trimmed length for job listing text.
pub const MIN_JOB_TEXT_CHARS: usize = 50;
/// Minimum trimmed length for CV text.
pub const MIN_CV_TEXT_CHARS: usize = 100;

pub struct Engine {
    lexicon: Lexicon,
    tokenizer: Tokenizer,
    extractor: SkillExtractor,
    job_builder: JobProfileBuilder,
    cv_builder: CvProfileBuilder,
    matcher: Matcher,
    suggestions: SuggestionGenerator,
    drafter: CoverLetterDrafter,
}

impl Engine {
    /// Build the engine, loading the skill lexicon once. A lexicon failure
    /// here is fatal: the process cannot serve requests without it.
    pub fn new(config: &Config) -> Result<Self> {
        let lexicon = Lexicon::load(&config.lexicon)?;
        let tokenizer = Tokenizer::new();
        let extractor = SkillExtractor::new(&lexicon, &tokenizer, &config.matching)?;
        debug!(
            "engine ready: lexicon v{} with {} skills",
            lexicon.version(),
            lexicon.len()
        );

        Ok(Self {
            lexicon,
            tokenizer,
            extractor,
            job_builder: JobProfileBuilder::new(),
            cv_builder: CvProfileBuilder::new(),
            matcher: Matcher::from_config(&config.matching),
            suggestions: SuggestionGenerator::from_config(&config.suggestions),
            drafter: CoverLetterDrafter::new(),
        })
    }

    /// Analyze a job listing into a profile of classified requirements.
    pub fn analyze_job(&self, job_text: &str) -> Result<JobProfile> {
        check_length(job_text, InputKind::Job, MIN_JOB_TEXT_CHARS)?;

        let tokens = self.tokenizer.normalize(job_text);
        let skills = self.extractor.extract(&tokens);
        let profile = self.job_builder.build(job_text, skills);
        debug!(
            "job analyzed: '{}', {} requirements",
            profile.title,
            profile.requirements.len()
        );
        Ok(profile)
    }

    /// Analyze CV text into a profile of skills and bullet sentences.
    pub fn analyze_cv(&self, cv_text: &str) -> Result<CvProfile> {
        check_length(cv_text, InputKind::Cv, MIN_CV_TEXT_CHARS)?;

        let tokens = self.tokenizer.normalize(cv_text);
        let skills = self.extractor.extract(&tokens);
        let profile = self.cv_builder.build(cv_text, skills);
        debug!(
            "cv analyzed: {} skills, {} bullets",
            profile.skills.len(),
            profile.bullets.len()
        );
        Ok(profile)
    }

    /// Score CV text against an analyzed job profile.
    pub fn score_cv(&self, cv_text: &str, job: &JobProfile) -> Result<MatchReport> {
        let cv = self.analyze_cv(cv_text)?;
        Ok(self.score_profiles(&cv, job))
    }

    /// Score two already-built profiles. Pure; no preconditions left to
    /// fail.
    pub fn score_profiles(&self, cv: &CvProfile, job: &JobProfile) -> MatchReport {
        let mut report = self.matcher.score(job, cv);
        report.suggestions = self.suggestions.suggest(&report.missing_skills, cv);
        debug!(
            "scored {}: {} matched, {} missing",
            report.score,
            report.matched_skills.len(),
            report.missing_skills.len()
        );
        report
    }

    /// Draft a cover letter from both profiles. Passing `None` for either
    /// is a stage-ordering bug in the caller and is reported as such.
    pub fn draft_cover_letter(
        &self,
        cv: Option<&CvProfile>,
        job: Option<&JobProfile>,
    ) -> Result<String> {
        let cv = cv.ok_or_else(|| {
            error!("cover letter requested before the CV was analyzed");
            CvMatchError::MissingProfile("cv")
        })?;
        let job = job.ok_or_else(|| {
            error!("cover letter requested before the job was analyzed");
            CvMatchError::MissingProfile("job")
        })?;

        Ok(self.drafter.draft(cv, job))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

fn check_length(text: &str, kind: InputKind, min: usize) -> Result<()> {
    let actual = text.trim().chars().count();
    if actual < min {
        return Err(CvMatchError::InputTooShort { kind, min, actual });
    }
    Ok(())
}
