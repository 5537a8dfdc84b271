//! cv-match library: deterministic job listing / CV matching and scoring

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{CvMatchError, Result};
pub use processing::cv_profile::CvProfile;
pub use processing::engine::Engine;
pub use processing::job_profile::JobProfile;
pub use processing::matcher::MatchReport;
