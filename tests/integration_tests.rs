//! Integration tests for cv-match

use cv_match::config::Config;
use cv_match::error::CvMatchError;
use cv_match::input::manager::InputManager;
use cv_match::processing::engine::Engine;
use std::path::Path;

fn engine() -> Engine {
    Engine::new(&Config::default()).unwrap()
}

// --- Input pipeline ---

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_cv.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Senior Frontend Developer"));
    assert!(text.contains("React"));
    assert!(text.contains("TypeScript"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_cv.md");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("React"));
    assert!(text.contains("Docker"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_cv.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(CvMatchError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

// --- End-to-end over fixtures ---

#[tokio::test]
async fn test_fixture_scenario_end_to_end() {
    let mut manager = InputManager::new();
    let job_text = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    let cv_text = manager
        .extract_text(Path::new("tests/fixtures/sample_cv.txt"))
        .await
        .unwrap();

    let engine = engine();
    let job = engine.analyze_job(&job_text).unwrap();
    assert_eq!(job.title, "Senior Frontend Developer");
    assert_eq!(job.company.as_deref(), Some("TechInnovate Solutions"));

    let report = engine.score_cv(&cv_text, &job).unwrap();
    let matched: Vec<&str> = report.matched_skills.iter().map(|s| s.id.as_str()).collect();
    let missing: Vec<&str> = report.missing_skills.iter().map(|s| s.id.as_str()).collect();

    assert_eq!(matched, vec!["react", "typescript"]);
    assert_eq!(missing, vec!["ci-cd"]);
    assert_eq!(report.score, 67);
    assert!(!report.suggestions.is_empty());
}

#[tokio::test]
async fn test_fixture_cover_letter() {
    let mut manager = InputManager::new();
    let job_text = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();
    let cv_text = manager
        .extract_text(Path::new("tests/fixtures/sample_cv.txt"))
        .await
        .unwrap();

    let engine = engine();
    let job = engine.analyze_job(&job_text).unwrap();
    let cv = engine.analyze_cv(&cv_text).unwrap();
    let letter = engine.draft_cover_letter(Some(&cv), Some(&job)).unwrap();

    assert!(letter.contains("Senior Frontend Developer"));
    assert!(letter.contains("TechInnovate Solutions"));
    assert!(letter.contains("John Doe"));
}

// --- Engine properties ---

const JOB_TEXT: &str = "\
Job Title: Senior Frontend Developer
Company: TechInnovate Solutions

Requirements:
- Expert knowledge of React
- TypeScript in production code
- CI/CD pipelines
";

const CV_TEXT: &str = "\
John Doe
Senior Frontend Developer

Experience:
- Six years building web applications with React
- Migrated a legacy JavaScript codebase to TypeScript
- Implemented a component library with Storybook
";

const NO_SKILLS_CV: &str = "\
A seasoned generalist comfortable across many problem domains, eager to \
learn, and quick on their feet when priorities change mid sprint. \
References available on request.
";

#[test]
fn test_determinism() {
    let engine = engine();
    let job = engine.analyze_job(JOB_TEXT).unwrap();

    let a = serde_json::to_vec(&engine.score_cv(CV_TEXT, &job).unwrap()).unwrap();
    let b = serde_json::to_vec(&engine.score_cv(CV_TEXT, &job).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_score_bounds() {
    let engine = engine();
    let job = engine.analyze_job(JOB_TEXT).unwrap();

    for cv_text in [CV_TEXT, NO_SKILLS_CV] {
        let report = engine.score_cv(cv_text, &job).unwrap();
        assert!(report.score <= 100);
    }
}

#[test]
fn test_empty_requirements_law() {
    let engine = engine();
    // No recognized heading and no lexicon skills anywhere in the text.
    let job = engine
        .analyze_job(
            "We are a small family bakery in Springfield looking for friendly \
             seasonal helpers for the busy summer months ahead.",
        )
        .unwrap();
    assert!(job.requirements.is_empty());

    for cv_text in [CV_TEXT, NO_SKILLS_CV] {
        let report = engine.score_cv(cv_text, &job).unwrap();
        assert_eq!(report.score, 100);
        assert!(report.matched_skills.is_empty());
        assert!(report.missing_skills.is_empty());
    }
}

#[test]
fn test_monotonicity() {
    let engine = engine();
    let job = engine.analyze_job(JOB_TEXT).unwrap();

    let before = engine.score_cv(CV_TEXT, &job).unwrap();

    let improved = format!("{}- Maintained CI/CD pipelines for every release\n", CV_TEXT);
    let after = engine.score_cv(&improved, &job).unwrap();

    assert!(after.score >= before.score);
    assert_eq!(after.score, 100);
}

#[test]
fn test_matched_missing_disjoint() {
    let engine = engine();
    let job = engine.analyze_job(JOB_TEXT).unwrap();
    let report = engine.score_cv(CV_TEXT, &job).unwrap();

    for matched in &report.matched_skills {
        assert!(report.missing_skills.iter().all(|m| m.id != matched.id));
    }
}

#[test]
fn test_zero_skill_cv_scores_zero() {
    let engine = engine();
    let job = engine.analyze_job(JOB_TEXT).unwrap();
    let report = engine.score_cv(NO_SKILLS_CV, &job).unwrap();

    assert_eq!(report.score, 0);
    assert_eq!(report.missing_skills.len(), 3);
}

#[test]
fn test_suggestion_cap() {
    let engine = engine();
    let job = engine
        .analyze_job(
            "Requirements:\n- React\n- TypeScript\n- Docker\n- Kubernetes\n\
             - GraphQL\n- Redis\n- Kafka\n- Terraform\n",
        )
        .unwrap();
    assert_eq!(job.requirements.len(), 8);

    let report = engine.score_cv(NO_SKILLS_CV, &job).unwrap();
    assert_eq!(report.missing_skills.len(), 8);
    assert_eq!(report.suggestions.len(), 5);
}

// --- Lexicon loading ---

#[test]
fn test_custom_lexicon_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skills.toml");
    std::fs::write(
        &path,
        "version = 1\n\n[[skills]]\nid = \"cobol\"\nlabel = \"COBOL\"\naliases = [\"cobol\"]\n",
    )
    .unwrap();

    let mut config = Config::default();
    config.lexicon.path = Some(path);

    let engine = Engine::new(&config).unwrap();
    assert_eq!(engine.lexicon().len(), 1);

    let job = engine
        .analyze_job("Requirements:\n- COBOL maintenance experience for our mainframe systems team\n")
        .unwrap();
    assert_eq!(job.requirements.len(), 1);
    assert_eq!(job.requirements[0].skill.id, "cobol");
}

#[test]
fn test_missing_lexicon_is_fatal() {
    let mut config = Config::default();
    config.lexicon.path = Some("/nonexistent/skills.toml".into());

    let result = Engine::new(&config);
    assert!(matches!(result, Err(CvMatchError::LexiconLoad(_))));
}
