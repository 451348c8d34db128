//! Data models for the resume analysis client.
//!
//! This module contains the wire types returned by the analysis service
//! and the domain types used for rendering (score tiers, metrics,
//! feedback items).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Experience level sent with the analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    /// Entry level / early career
    Junior,
    /// Mid-career (default)
    #[default]
    Mid,
    /// Senior individual contributor
    Senior,
    /// Lead / staff and above
    Lead,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceLevel::Junior => write!(f, "junior"),
            ExperienceLevel::Mid => write!(f, "mid"),
            ExperienceLevel::Senior => write!(f, "senior"),
            ExperienceLevel::Lead => write!(f, "lead"),
        }
    }
}

/// Score band driving color and label for every score in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    /// Score >= 80
    Excellent,
    /// Score >= 60
    Good,
    /// Score < 60
    NeedsWork,
}

impl ScoreTier {
    /// Classify a 0-100 score into its tier.
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreTier::Excellent
        } else if score >= 60 {
            ScoreTier::Good
        } else {
            ScoreTier::NeedsWork
        }
    }

    /// Human-readable label for the tier.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent",
            ScoreTier::Good => "Good",
            ScoreTier::NeedsWork => "Needs Work",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One of the four fixed scoring dimensions reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Ats,
    Content,
    Keyword,
    Format,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Metric; 4] = [Metric::Ats, Metric::Content, Metric::Keyword, Metric::Format];

    /// Display name for the metric.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Ats => "ATS Compatibility",
            Metric::Content => "Content Quality",
            Metric::Keyword => "Keyword Match",
            Metric::Format => "Formatting",
        }
    }
}

/// Per-metric scores as returned by the service.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MetricScores {
    #[serde(default)]
    pub ats: u8,
    #[serde(default)]
    pub content: u8,
    #[serde(default)]
    pub keyword: u8,
    #[serde(default)]
    pub format: u8,
}

impl MetricScores {
    /// Look up the score for a metric.
    pub fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::Ats => self.ats,
            Metric::Content => self.content,
            Metric::Keyword => self.keyword,
            Metric::Format => self.format,
        }
    }
}

/// Sentiment of a feedback item. Unknown or missing values decode as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Positive,
    Negative,
    #[default]
    #[serde(other)]
    Neutral,
}

impl FeedbackKind {
    /// Icon shown next to the feedback item.
    pub fn icon(&self) -> &'static str {
        match self {
            FeedbackKind::Positive => "✔",
            FeedbackKind::Negative => "⚠",
            FeedbackKind::Neutral => "ℹ",
        }
    }
}

/// A single feedback entry from the service.
///
/// Title and message may be absent on the wire; the accessors apply the
/// documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Sentiment of the item.
    #[serde(rename = "type", default)]
    pub kind: FeedbackKind,
    /// Short title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Feedback body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FeedbackItem {
    /// Title with the default applied.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Feedback")
    }

    /// Message with the default applied.
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or("No specific feedback provided.")
    }
}

/// Feedback block of an analysis result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feedback {
    /// Overall summary line (the service may omit it).
    #[serde(
        rename = "overallMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub overall_message: Option<String>,
    /// Ordered detailed feedback entries.
    #[serde(rename = "detailedFeedback", default)]
    pub detailed_feedback: Vec<FeedbackItem>,
}

/// A complete analysis result from the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall score 0-100.
    pub overall_score: u8,
    /// Feedback block.
    #[serde(default)]
    pub feedback: Feedback,
    /// Per-metric scores.
    #[serde(default)]
    pub scores: MetricScores,
}

impl AnalysisResult {
    /// Tier of the overall score.
    pub fn overall_tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.overall_score)
    }
}

/// Envelope returned by `POST /api/analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    /// Whether the analysis succeeded logically.
    #[serde(default)]
    pub success: bool,
    /// Present on success.
    #[serde(default)]
    pub result: Option<AnalysisResult>,
    /// Present on failure.
    #[serde(default)]
    pub error: Option<String>,
    /// Non-fatal notice from the service (e.g. no actionable suggestions).
    #[serde(default)]
    pub warning: Option<String>,
    /// Server-side name of the stored upload.
    #[serde(default)]
    pub filename: Option<String>,
    /// Whether the resume text was truncated before analysis.
    #[serde(default)]
    pub truncated: bool,
}

/// Error body of a non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
