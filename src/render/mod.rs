//! Result and error rendering.
//!
//! This module turns an `AnalysisResult` into colored terminal output
//! (score tiers, per-metric bars, the feedback list) and renders the
//! retry-capable error banners. It also generates the optional saved
//! Markdown/JSON reports.

use crate::client::AnalysisError;
use crate::config::Theme;
use crate::models::{AnalysisResult, ExperienceLevel, FeedbackKind, Metric, ScoreTier};
use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::Serialize;

/// Placeholder shown when the service returns no detailed feedback.
pub const NO_FEEDBACK_MESSAGE: &str = "No detailed feedback was generated for this resume.";

/// Terminal renderer for analysis output.
pub struct Renderer {
    theme: Theme,
    bar_width: usize,
}

impl Renderer {
    pub fn new(theme: Theme, bar_width: usize) -> Self {
        Self { theme, bar_width }
    }

    /// Color a string by score tier, honoring the theme palette.
    fn paint(&self, text: &str, tier: ScoreTier) -> ColoredString {
        match (self.theme, tier) {
            (Theme::Light, ScoreTier::Excellent) => text.green(),
            (Theme::Light, ScoreTier::Good) => text.yellow(),
            (Theme::Light, ScoreTier::NeedsWork) => text.red(),
            (Theme::Dark, ScoreTier::Excellent) => text.bright_green(),
            (Theme::Dark, ScoreTier::Good) => text.bright_yellow(),
            (Theme::Dark, ScoreTier::NeedsWork) => text.bright_red(),
        }
    }

    /// Proportional score bar, `bar_width` characters wide.
    fn score_bar(&self, score: u8) -> String {
        let filled = (score.min(100) as usize * self.bar_width) / 100;
        let mut bar = "█".repeat(filled);
        bar.push_str(&"░".repeat(self.bar_width - filled));
        bar
    }

    /// Render a full analysis result for the terminal.
    pub fn render_results(&self, result: &AnalysisResult, warning: Option<&str>) -> String {
        let mut out = String::new();

        // Overall score
        let tier = result.overall_tier();
        let headline = format!("Overall Score: {} / 100  ({})", result.overall_score, tier);
        out.push('\n');
        out.push_str(&format!("  {}\n", self.paint(&headline, tier).bold()));

        if let Some(ref message) = result.feedback.overall_message {
            out.push_str(&format!("  {}\n", message));
        }
        out.push('\n');

        // Per-metric bars with tier labels
        for metric in Metric::ALL {
            let score = result.scores.get(metric);
            let tier = ScoreTier::from_score(score);
            let bar = self.paint(&self.score_bar(score), tier);
            out.push_str(&format!(
                "  {:<18} {}  {:>3}  {}\n",
                metric.label(),
                bar,
                score,
                self.paint(tier.label(), tier)
            ));
        }
        out.push('\n');

        // Detailed feedback, in input order
        out.push_str("  Feedback:\n");
        if result.feedback.detailed_feedback.is_empty() {
            out.push_str(&format!(
                "  {} {}\n",
                FeedbackKind::Neutral.icon(),
                NO_FEEDBACK_MESSAGE
            ));
        } else {
            for item in &result.feedback.detailed_feedback {
                out.push_str(&format!(
                    "  {} {}\n      {}\n",
                    item.kind.icon(),
                    item.title().bold(),
                    item.message()
                ));
            }
        }

        if let Some(warning) = warning {
            out.push_str(&format!("\n  ⚠ {}\n", warning.yellow()));
        }

        out
    }

    /// Render a classified failure.
    ///
    /// Model and connection failures get a banner with remediation
    /// steps; everything else is a plain alert with the server message.
    pub fn render_error(&self, error: &AnalysisError) -> String {
        let mut out = match error {
            AnalysisError::Model(message) => self.model_error_banner(message),
            AnalysisError::Connection(message) => self.connection_error_banner(message),
            AnalysisError::Service(message) => format!("\n  ❌ {}\n", message.red()),
            AnalysisError::InvalidResponse(message) => {
                format!("\n  ❌ Invalid response from the service: {}\n", message.red())
            }
        };
        if error.is_retryable() {
            out.push_str("    3. Run the analysis again\n");
        }
        out
    }

    /// Banner for a missing/unavailable backend model.
    fn model_error_banner(&self, message: &str) -> String {
        let mut out = String::new();
        out.push('\n');
        out.push_str(&format!("  🤖 {}\n", "Analysis Model Required".red().bold()));
        out.push_str(&format!("  {}\n\n", message));
        out.push_str("  The service could not use its language model:\n");
        out.push_str("    1. Pull the model:           ollama pull llama3\n");
        out.push_str("    2. Make sure Ollama is up:   ollama serve\n");
        out
    }

    /// Banner for an unreachable service.
    fn connection_error_banner(&self, message: &str) -> String {
        let mut out = String::new();
        out.push('\n');
        out.push_str(&format!("  🔌 {}\n", "Connection Error".red().bold()));
        out.push_str(&format!("  {}\n\n", message));
        out.push_str("  Could not connect to the analysis service:\n");
        out.push_str("    1. Ensure the backend server is running\n");
        out.push_str("    2. Check your network connection\n");
        out
    }
}

/// Metadata header for saved reports.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Name of the analyzed resume file.
    pub resume_name: String,
    /// Job title the resume was scored against.
    pub job_title: String,
    /// Experience level sent with the request.
    pub experience_level: ExperienceLevel,
    /// Service endpoint that produced the result.
    pub endpoint: String,
    /// When the analysis ran.
    pub analysis_date: DateTime<Utc>,
    /// Round-trip duration in seconds.
    pub duration_seconds: f64,
}

/// A saved report document (JSON format serializes this directly).
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument<'a> {
    pub metadata: &'a ReportMetadata,
    pub result: &'a AnalysisResult,
}

/// Generate a Markdown report.
pub fn generate_markdown_report(result: &AnalysisResult, metadata: &ReportMetadata) -> String {
    let mut output = String::new();

    output.push_str("# ResumeLens Report\n\n");

    // Metadata section
    output.push_str("## Metadata\n\n");
    output.push_str(&format!("- **Resume:** `{}`\n", metadata.resume_name));
    output.push_str(&format!("- **Job Title:** {}\n", metadata.job_title));
    output.push_str(&format!(
        "- **Experience Level:** {}\n",
        metadata.experience_level
    ));
    output.push_str(&format!("- **Service:** {}\n", metadata.endpoint));
    output.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "- **Duration:** {:.1}s\n\n",
        metadata.duration_seconds
    ));

    // Scores section
    let tier = result.overall_tier();
    output.push_str("## Scores\n\n");
    output.push_str(&format!(
        "**Overall: {} / 100 ({})**\n\n",
        result.overall_score,
        tier.label()
    ));
    output.push_str("| Metric | Score | Rating |\n");
    output.push_str("|:---|:---:|:---|\n");
    for metric in Metric::ALL {
        let score = result.scores.get(metric);
        output.push_str(&format!(
            "| {} | {} | {} |\n",
            metric.label(),
            score,
            ScoreTier::from_score(score).label()
        ));
    }
    output.push('\n');

    // Feedback section
    output.push_str("## Feedback\n\n");
    if let Some(ref message) = result.feedback.overall_message {
        output.push_str(&format!("{}\n\n", message));
    }
    if result.feedback.detailed_feedback.is_empty() {
        output.push_str(&format!("{}\n", NO_FEEDBACK_MESSAGE));
    } else {
        for item in &result.feedback.detailed_feedback {
            output.push_str(&format!(
                "- {} **{}** - {}\n",
                item.kind.icon(),
                item.title(),
                item.message()
            ));
        }
    }
    output.push('\n');

    output.push_str("---\n\n*Report generated by ResumeLens*\n");

    output
}

/// Generate a pretty-printed JSON report.
pub fn generate_json_report(result: &AnalysisResult, metadata: &ReportMetadata) -> Result<String> {
    let document = ReportDocument { metadata, result };
    serde_json::to_string_pretty(&document).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feedback, FeedbackItem, MetricScores};

    fn create_test_result() -> AnalysisResult {
        AnalysisResult {
            overall_score: 82,
            feedback: Feedback {
                overall_message: Some("Solid resume overall.".to_string()),
                detailed_feedback: vec![
                    FeedbackItem {
                        kind: FeedbackKind::Positive,
                        title: Some("Suggestion".to_string()),
                        message: Some("Strong summary section".to_string()),
                    },
                    FeedbackItem {
                        kind: FeedbackKind::Negative,
                        title: None,
                        message: Some("Missing keywords for the role".to_string()),
                    },
                ],
            },
            scores: MetricScores {
                ats: 85,
                content: 78,
                keyword: 61,
                format: 59,
            },
        }
    }

    fn create_test_metadata() -> ReportMetadata {
        ReportMetadata {
            resume_name: "resume.pdf".to_string(),
            job_title: "Backend Engineer".to_string(),
            experience_level: ExperienceLevel::Mid,
            endpoint: "http://localhost:5000".to_string(),
            analysis_date: Utc::now(),
            duration_seconds: 12.5,
        }
    }

    fn plain_renderer() -> Renderer {
        colored::control::set_override(false);
        Renderer::new(Theme::Light, 20)
    }

    #[test]
    fn test_render_results_contains_scores_and_tiers() {
        let output = plain_renderer().render_results(&create_test_result(), None);

        assert!(output.contains("Overall Score: 82 / 100  (Excellent)"));
        assert!(output.contains("ATS Compatibility"));
        assert!(output.contains("Formatting"));
        // Each metric carries its own tier label
        assert!(output.contains("Good"));
        assert!(output.contains("Needs Work"));
        // Feedback items in input order with defaults applied
        assert!(output.contains("✔ Suggestion"));
        assert!(output.contains("⚠ Feedback"));
        assert!(output.contains("Missing keywords for the role"));
    }

    #[test]
    fn test_render_empty_feedback_placeholder() {
        let mut result = create_test_result();
        result.feedback.detailed_feedback.clear();

        let output = plain_renderer().render_results(&result, None);
        assert!(output.contains(NO_FEEDBACK_MESSAGE));
        // Exactly one placeholder entry
        assert_eq!(output.matches(NO_FEEDBACK_MESSAGE).count(), 1);
        assert_eq!(output.matches("ℹ").count(), 1);
    }

    #[test]
    fn test_render_warning_line() {
        let output = plain_renderer()
            .render_results(&create_test_result(), Some("No actionable suggestions"));
        assert!(output.contains("No actionable suggestions"));
    }

    #[test]
    fn test_score_bar_is_proportional() {
        let renderer = plain_renderer();

        assert_eq!(renderer.score_bar(100), "█".repeat(20));
        assert_eq!(renderer.score_bar(0), "░".repeat(20));

        let half = renderer.score_bar(50);
        assert_eq!(half.chars().filter(|&c| c == '█').count(), 10);
        assert_eq!(half.chars().count(), 20);
    }

    #[test]
    fn test_error_rendering_dispatch() {
        let renderer = plain_renderer();

        let banner = renderer.render_error(&AnalysisError::Model("no model found".into()));
        assert!(banner.contains("Analysis Model Required"));
        assert!(banner.contains("ollama pull"));
        assert!(banner.contains("Run the analysis again"));

        let banner = renderer.render_error(&AnalysisError::Connection("refused".into()));
        assert!(banner.contains("Connection Error"));
        assert!(banner.contains("backend server"));
        assert!(banner.contains("Run the analysis again"));

        let alert = renderer.render_error(&AnalysisError::Service("bad title".into()));
        assert!(alert.contains("bad title"));
        assert!(!alert.contains("Run the analysis again"));
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_result(), &create_test_metadata());

        assert!(markdown.contains("# ResumeLens Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("`resume.pdf`"));
        assert!(markdown.contains("Backend Engineer"));
        assert!(markdown.contains("**Overall: 82 / 100 (Excellent)**"));
        assert!(markdown.contains("| ATS Compatibility | 85 | Excellent |"));
        assert!(markdown.contains("| Formatting | 59 | Needs Work |"));
        assert!(markdown.contains("Strong summary section"));
    }

    #[test]
    fn test_generate_markdown_report_empty_feedback() {
        let mut result = create_test_result();
        result.feedback.detailed_feedback.clear();

        let markdown = generate_markdown_report(&result, &create_test_metadata());
        assert!(markdown.contains(NO_FEEDBACK_MESSAGE));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_result(), &create_test_metadata()).unwrap();

        assert!(json.contains("\"overall_score\": 82"));
        assert!(json.contains("\"job_title\": \"Backend Engineer\""));
        assert!(json.contains("\"detailedFeedback\""));
    }
}
