//! HTTP client for the resume analysis service.
//!
//! One multipart POST per analysis. Failures are classified into the
//! error taxonomy the UI renders: connection errors (the request never
//! reached the service), model errors (the service's language model is
//! missing or unavailable), and generic service errors.

use crate::models::{AnalysisResult, AnalyzeResponse, ErrorBody, ExperienceLevel, HealthResponse};
use crate::resume::ResumeFile;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Fallback message when the service reports a failure without one.
const GENERIC_FAILURE: &str = "Analysis failed";

/// A classified analysis failure.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The request never reached the service.
    #[error("Could not connect to the analysis service: {0}")]
    Connection(String),

    /// The service reached us but its language model is missing or down.
    #[error("Analysis model unavailable: {0}")]
    Model(String),

    /// Any other failure reported by the service.
    #[error("{0}")]
    Service(String),

    /// The service answered with something we couldn't decode.
    #[error("Invalid response from the analysis service: {0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    /// Whether the failure gets a retry-capable banner with remediation
    /// steps (vs. a plain alert).
    pub fn is_retryable(&self) -> bool {
        matches!(self, AnalysisError::Connection(_) | AnalysisError::Model(_))
    }
}

/// Classify a service-reported failure message.
///
/// A message containing the substring "model" is attributed to the
/// backend's language model dependency. The service does not expose a
/// stable error-code contract, so this is a substring heuristic.
fn classify_service_error(message: Option<String>) -> AnalysisError {
    let message = message.unwrap_or_else(|| GENERIC_FAILURE.to_string());
    if message.contains("model") {
        AnalysisError::Model(message)
    } else {
        AnalysisError::Service(message)
    }
}

/// Settings for the analysis client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `http://localhost:5000`.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Successful analysis plus the non-fatal extras the service may attach.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// Non-fatal notice from the service.
    pub warning: Option<String>,
    /// Whether the resume text was truncated before analysis.
    pub truncated: bool,
}

/// Client for the analysis service API.
pub struct AnalysisClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl AnalysisClient {
    /// Create a client with the configured timeout.
    pub fn new(config: ClientConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Submit a resume for analysis.
    ///
    /// Builds a multipart body with the file, job title, and experience
    /// level, and classifies every failure path.
    pub async fn analyze(
        &self,
        resume: &ResumeFile,
        job_title: &str,
        experience_level: ExperienceLevel,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let url = format!("{}/api/analyze", self.config.endpoint);
        info!("Submitting {} for analysis to {}", resume.name, url);

        let file_part = Part::bytes(resume.bytes.clone()).file_name(resume.name.clone());
        let form = Form::new()
            .part("resume", file_part)
            .text("job_title", job_title.to_string())
            .text("experience_level", experience_level.to_string());

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Connection(format!(
                        "Request timed out after {}s",
                        self.config.timeout_seconds
                    ))
                } else if e.is_connect() {
                    AnalysisError::Connection(format!(
                        "Cannot reach the service at {}",
                        self.config.endpoint
                    ))
                } else {
                    AnalysisError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error_body: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            let message = error_body
                .error
                .unwrap_or_else(|| format!("{} (HTTP {})", GENERIC_FAILURE, status.as_u16()));
            warn!("Service returned HTTP {}: {}", status, message);
            return Err(classify_service_error(Some(message)));
        }

        let envelope: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;

        if !envelope.success {
            return Err(classify_service_error(envelope.error));
        }

        if let Some(ref stored) = envelope.filename {
            debug!("Service stored the upload as {}", stored);
        }

        let result = envelope.result.ok_or_else(|| {
            AnalysisError::InvalidResponse("success response carried no result".to_string())
        })?;

        debug!(
            "Analysis complete: overall {} ({})",
            result.overall_score,
            result.overall_tier()
        );

        Ok(AnalysisOutcome {
            result,
            warning: envelope.warning,
            truncated: envelope.truncated,
        })
    }

    /// Probe `GET /api/health`.
    pub async fn health(&self) -> Result<HealthResponse, AnalysisError> {
        let url = format!("{}/api/health", self.config.endpoint);
        debug!("Checking service health at {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_connect() {
                AnalysisError::Connection(format!(
                    "Cannot reach the service at {}",
                    self.config.endpoint
                ))
            } else {
                AnalysisError::Connection(e.to_string())
            }
        })?;

        response
            .json()
            .await
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_classification() {
        let err = classify_service_error(Some("no model found".to_string()));
        assert!(matches!(err, AnalysisError::Model(_)));
        assert!(err.is_retryable());

        let err = classify_service_error(Some("Empty response from AI model".to_string()));
        assert!(matches!(err, AnalysisError::Model(_)));
    }

    #[test]
    fn test_generic_error_keeps_exact_message() {
        let err = classify_service_error(Some("bad title".to_string()));
        match err {
            AnalysisError::Service(message) => assert_eq!(message, "bad title"),
            other => panic!("expected Service error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_message_falls_back() {
        let err = classify_service_error(None);
        match err {
            AnalysisError::Service(message) => assert_eq!(message, "Analysis failed"),
            other => panic!("expected Service error, got {:?}", other),
        }
    }

    #[test]
    fn test_classification_is_case_sensitive() {
        // The heuristic matches the lowercase substring only, as the
        // service emits lowercase "model" in its error strings.
        let err = classify_service_error(Some("Model warming up".to_string()));
        assert!(matches!(err, AnalysisError::Service(_)));
    }

    #[test]
    fn test_retryability() {
        assert!(AnalysisError::Connection("down".into()).is_retryable());
        assert!(AnalysisError::Model("missing".into()).is_retryable());
        assert!(!AnalysisError::Service("bad input".into()).is_retryable());
        assert!(!AnalysisError::InvalidResponse("garbage".into()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = AnalysisError::Service("bad title".to_string());
        assert_eq!(err.to_string(), "bad title");

        let err = AnalysisError::Connection("refused".to_string());
        assert!(err.to_string().contains("Could not connect"));
    }
}
