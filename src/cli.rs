//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::config::Theme;
use crate::models::ExperienceLevel;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ResumeLens - resume analysis client
///
/// Submit a resume to the local analysis service and get tiered scores
/// (ATS compatibility, content quality, keyword match, formatting) plus
/// detailed feedback, straight in your terminal.
///
/// Examples:
///   resumelens resume.pdf --job-title "Backend Engineer"
///   resumelens resume.docx -j "Data Analyst" --level senior
///   resumelens resume.pdf -j "SRE" --output report.md
///   resumelens --interactive
///   resumelens --check
///   resumelens --toggle-theme
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the resume file (PDF, DOC, DOCX, or TXT)
    ///
    /// Not required with --init-config, --toggle-theme, --check,
    /// or --interactive.
    #[arg(value_name = "RESUME")]
    pub resume: Option<PathBuf>,

    /// Job title to score the resume against
    #[arg(short, long, value_name = "TITLE", env = "RESUMELENS_JOB_TITLE")]
    pub job_title: Option<String>,

    /// Experience level for the target role
    #[arg(short, long, value_enum, default_value_t = ExperienceLevel::Mid)]
    pub level: ExperienceLevel,

    /// Base URL of the analysis service
    ///
    /// Defaults to http://localhost:5000 (or the config file value).
    #[arg(long, value_name = "URL", env = "RESUMELENS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Save the analysis as a report file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Format for the saved report (markdown, json)
    ///
    /// Defaults to markdown (or the config file value).
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Exit with code 2 if the overall score is below this threshold
    ///
    /// Useful for CI pipelines gating on resume quality.
    #[arg(long, value_name = "SCORE")]
    pub fail_under: Option<u8>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .resumelens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Color theme for this run (overrides the persisted preference)
    #[arg(long, value_enum, value_name = "THEME")]
    pub theme: Option<Theme>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Interactive mode: prompt for inputs and offer retry / try-another
    #[arg(short, long)]
    pub interactive: bool,

    /// Check that the analysis service is reachable and exit
    #[arg(long)]
    pub check: bool,

    /// Flip the persisted light/dark theme preference and exit
    #[arg(long)]
    pub toggle_theme: bool,

    /// Generate a default .resumelens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Format for a saved report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// True when no resume/job-title inputs are required up front.
    pub fn is_standalone_mode(&self) -> bool {
        self.init_config || self.toggle_theme || self.check || self.interactive
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Standalone modes collect or need no inputs
        if !self.is_standalone_mode() {
            let resume = self
                .resume
                .as_ref()
                .ok_or_else(|| "A resume file is required".to_string())?;

            let name = resume
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| format!("Invalid resume path: {}", resume.display()))?;

            if !crate::resume::allowed_extension(name) {
                return Err(format!(
                    "Unsupported file type '{}'. Allowed: pdf, doc, docx, txt",
                    name
                ));
            }

            let ready = self
                .job_title
                .as_deref()
                .map(|t| !t.trim().is_empty())
                .unwrap_or(false);
            if !ready {
                return Err("A job title is required (use --job-title)".to_string());
            }
        }

        // Validate endpoint format if provided
        if let Some(ref endpoint) = self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err("Endpoint URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Validate score threshold
        if let Some(threshold) = self.fail_under {
            if threshold > 100 {
                return Err("--fail-under must be between 0 and 100".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the merged config-file preference; --quiet
    /// still wins over it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            resume: Some(PathBuf::from("resume.pdf")),
            job_title: Some("Software Engineer".to_string()),
            level: ExperienceLevel::Mid,
            endpoint: Some("http://localhost:5000".to_string()),
            timeout: None,
            output: None,
            format: None,
            fail_under: None,
            config: None,
            theme: None,
            verbose: false,
            quiet: false,
            interactive: false,
            check: false,
            toggle_theme: false,
            init_config: false,
        }
    }

    #[test]
    fn test_valid_args() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_resume() {
        let mut args = make_args();
        args.resume = None;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_bad_extension() {
        let mut args = make_args();
        args.resume = Some(PathBuf::from("resume.exe"));
        assert!(args.validate().is_err());

        // Case-insensitive acceptance
        args.resume = Some(PathBuf::from("R.PDF"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_job_title() {
        let mut args = make_args();
        args.job_title = None;
        assert!(args.validate().is_err());

        args.job_title = Some("   ".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_endpoint() {
        let mut args = make_args();
        args.endpoint = Some("localhost:5000".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_fail_under_range() {
        let mut args = make_args();
        args.fail_under = Some(101);
        assert!(args.validate().is_err());

        args.fail_under = Some(100);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_standalone_modes_skip_input_checks() {
        let modes: [fn(&mut Args); 4] = [
            |a| a.init_config = true,
            |a| a.toggle_theme = true,
            |a| a.check = true,
            |a| a.interactive = true,
        ];
        for setter in modes {
            let mut args = make_args();
            args.resume = None;
            args.job_title = None;
            setter(&mut args);
            assert!(args.validate().is_ok());
        }
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
    }

    #[test]
    fn test_log_level_honors_config_verbose() {
        let mut args = make_args();
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        // --quiet still wins over the config preference
        args.quiet = true;
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }
}
