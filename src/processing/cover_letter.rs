//! Cover letter drafting from matched-skill evidence

use crate::processing::cv_profile::CvProfile;
use crate::processing::job_profile::JobProfile;
use std::collections::HashSet;

/// Evidence bullets quoted in the letter body.
const MAX_EVIDENCE_BULLETS: usize = 5;

#[derive(Debug, Default)]
pub struct CoverLetterDrafter;

impl CoverLetterDrafter {
    pub fn new() -> Self {
        Self
    }

    /// Fill the letter template from the two profiles.
    ///
    /// Deterministic given identical inputs and never fails: every empty
    /// field falls back to generic phrasing. Evidence bullets follow the
    /// matched skills' order of appearance in the job profile, one bullet
    /// per skill, at most five.
    pub fn draft(&self, cv: &CvProfile, job: &JobProfile) -> String {
        let title = if job.title.is_empty() {
            "the advertised role"
        } else {
            job.title.as_str()
        };
        let company = job.company.as_deref().unwrap_or("your company");

        let matched_labels = self.matched_labels(cv, job);
        let evidence = self.evidence_bullets(cv, job);

        let mut letter = String::new();
        letter.push_str("Dear Hiring Manager,\n\n");

        letter.push_str(&format!(
            "I am writing to apply for the {} position at {}. ",
            title, company
        ));
        match matched_labels.len() {
            0 => letter.push_str(
                "I believe my background is a strong fit for the role as described.\n\n",
            ),
            _ => letter.push_str(&format!(
                "My background in {} maps directly onto the role's requirements.\n\n",
                join_labels(&matched_labels)
            )),
        }

        if evidence.is_empty() {
            letter.push_str(
                "My CV, enclosed with this application, details the experience most relevant to the role.\n\n",
            );
        } else {
            letter.push_str("My experience aligns with the requirements outlined in your listing:\n\n");
            for bullet in &evidence {
                letter.push_str(&format!("• {}\n", bullet));
            }
            letter.push('\n');
        }

        letter.push_str(&format!(
            "I would welcome the opportunity to discuss how my experience can contribute to {}. Thank you for considering my application.\n\n",
            company
        ));

        match &cv.candidate_name {
            Some(name) => letter.push_str(&format!("Sincerely,\n\n{}\n", name)),
            None => letter.push_str("Sincerely,\n"),
        }

        letter
    }

    /// Labels of matched skills in job order, capped for the opening line.
    fn matched_labels(&self, cv: &CvProfile, job: &JobProfile) -> Vec<String> {
        job.requirements
            .iter()
            .filter(|r| cv.has_skill(&r.skill.id))
            .map(|r| r.skill.label.clone())
            .take(3)
            .collect()
    }

    /// One CV bullet per matched skill, in job order. A bullet mentioning
    /// several matched skills is only quoted once.
    fn evidence_bullets(&self, cv: &CvProfile, job: &JobProfile) -> Vec<String> {
        let mut used: HashSet<usize> = HashSet::new();
        let mut evidence = Vec::new();

        for requirement in &job.requirements {
            if evidence.len() >= MAX_EVIDENCE_BULLETS {
                break;
            }
            if !cv.has_skill(&requirement.skill.id) {
                continue;
            }

            let found = cv.bullets.iter().enumerate().find(|(idx, bullet)| {
                !used.contains(idx) && bullet.skills.contains(&requirement.skill.id)
            });
            if let Some((idx, bullet)) = found {
                used.insert(idx);
                evidence.push(bullet.text.clone());
            }
        }

        evidence
    }
}

fn join_labels(labels: &[String]) -> String {
    match labels {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}
