//! Review session state.
//!
//! `ReviewForm` holds the form fields (resume, job title, experience
//! level) and the current UI state. All analysis state lives here
//! explicitly rather than in module-level globals.

use crate::models::ExperienceLevel;
use crate::resume::ResumeFile;
use std::path::Path;
use tracing::debug;

/// Lifecycle of one analysis attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    /// Collecting inputs; the only state a request can be sent from.
    #[default]
    Reviewing,
    /// A request is in flight.
    Analyzing,
    /// A result is on screen.
    ShowingResults,
    /// An error banner is on screen.
    ShowingError,
}

/// The analysis form: inputs plus current state.
#[derive(Debug, Default)]
pub struct ReviewForm {
    pub resume: Option<ResumeFile>,
    pub job_title: String,
    pub experience_level: ExperienceLevel,
    state: UiState,
}

impl ReviewForm {
    /// Create an empty form in the Reviewing state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current UI state.
    pub fn state(&self) -> UiState {
        self.state
    }

    /// Select a resume file. On failure the previous selection is kept
    /// and the form stays in Reviewing.
    pub fn select_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let resume = ResumeFile::open(path)?;
        debug!("Form accepted {} ({} bytes)", resume.name, resume.size());
        self.resume = Some(resume);
        Ok(())
    }

    /// Set the job title (stored as-is; readiness trims it).
    pub fn set_job_title(&mut self, title: impl Into<String>) {
        self.job_title = title.into();
    }

    /// True iff a resume is selected and the trimmed job title is non-empty.
    pub fn validate_inputs(&self) -> bool {
        self.resume.is_some() && !self.job_title.trim().is_empty()
    }

    /// Trimmed job title for the request body.
    pub fn job_title_trimmed(&self) -> &str {
        self.job_title.trim()
    }

    /// Transition into Analyzing. Only valid from Reviewing with a
    /// sendable form.
    pub fn begin_analysis(&mut self) -> anyhow::Result<()> {
        if self.state != UiState::Reviewing {
            anyhow::bail!("An analysis is already in progress");
        }
        if !self.validate_inputs() {
            anyhow::bail!("Please upload a resume and enter a job title");
        }
        self.state = UiState::Analyzing;
        Ok(())
    }

    /// Record the outcome of the in-flight request.
    pub fn finish_analysis(&mut self, success: bool) {
        debug_assert_eq!(self.state, UiState::Analyzing);
        self.state = if success {
            UiState::ShowingResults
        } else {
            UiState::ShowingError
        };
    }

    /// Return to Reviewing for a retry without clearing the inputs.
    pub fn retry(&mut self) {
        self.state = UiState::Reviewing;
    }

    /// Clear every field back to its default and return to Reviewing.
    pub fn reset(&mut self) {
        self.resume = None;
        self.job_title.clear();
        self.experience_level = ExperienceLevel::Mid;
        self.state = UiState::Reviewing;
    }
}
