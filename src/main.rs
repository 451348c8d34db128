//! ResumeLens - CLI client for the resume analysis service
//!
//! Submits a resume with a target job title to the local analysis
//! service and renders the returned scores and feedback.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (validation, connection, service failure)
//!   2 - Overall score below --fail-under threshold

mod cli;
mod client;
mod config;
mod models;
mod render;
mod resume;
mod session;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use client::{AnalysisClient, AnalysisOutcome, ClientConfig};
use config::{Config, CONFIG_FILE};
use indicatif::{ProgressBar, ProgressStyle};
use render::{ReportMetadata, Renderer};
use session::ReviewForm;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .resumelens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to customize the service endpoint, timeout, and theme.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Called after the config merge so the `[general] verbose` preference
/// takes effect; --quiet still forces errors-only.
fn init_logging(args: &Args, config: &Config) {
    let level = args.log_level(config.general.verbose);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the requested workflow. Returns the exit code.
async fn run(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;

    // Handle --toggle-theme against the persisted (pre-merge) value
    if args.toggle_theme {
        return handle_toggle_theme(config, &args);
    }

    config.merge_with_args(&args);
    init_logging(&args, &config);

    info!("ResumeLens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let client = AnalysisClient::new(ClientConfig {
        endpoint: config.service.endpoint.clone(),
        timeout_seconds: config.service.timeout_seconds,
    });
    let renderer = Renderer::new(config.general.theme, config.report.bar_width);

    // Handle --check: probe the service and exit
    if args.check {
        return handle_check(&client, &renderer).await;
    }

    if args.interactive {
        run_interactive(&client, &renderer, &args, &config).await
    } else {
        run_single_shot(&client, &renderer, &args, &config).await
    }
}

/// One-shot mode: submit the resume from the arguments and exit.
async fn run_single_shot(
    client: &AnalysisClient,
    renderer: &Renderer,
    args: &Args,
    config: &Config,
) -> Result<i32> {
    let mut form = ReviewForm::new();

    // validate() already gated these; select_file re-runs the extension check
    let resume_path = args
        .resume
        .clone()
        .context("A resume file is required")?;
    form.select_file(&resume_path)?;
    form.set_job_title(args.job_title.clone().unwrap_or_default());
    form.experience_level = args.level;

    submit_analysis(client, renderer, &mut form, args, config).await
}

/// Interactive mode: prompt for inputs, offer retry and try-another.
async fn run_interactive(
    client: &AnalysisClient,
    renderer: &Renderer,
    args: &Args,
    config: &Config,
) -> Result<i32> {
    let mut form = ReviewForm::new();
    form.experience_level = args.level;

    if let Some(ref path) = args.resume {
        if let Err(e) = form.select_file(path) {
            eprintln!("⚠️  {}", e);
        }
    }
    if let Some(ref title) = args.job_title {
        form.set_job_title(title.clone());
    }

    let mut exit_code;

    loop {
        fill_form(&mut form)?;

        exit_code = submit_analysis(client, renderer, &mut form, args, config).await?;

        if exit_code == 0 || exit_code == 2 {
            // Results are on screen; offer a fresh round
            if !confirm("Analyze another resume?")? {
                break;
            }
            form.reset();
        } else {
            // Error banner is on screen; retry is user-initiated
            if !confirm("Try again with the same inputs?")? {
                break;
            }
            form.retry();
        }
    }

    Ok(exit_code)
}

/// Prompt until the form is sendable.
fn fill_form(form: &mut ReviewForm) -> Result<()> {
    while form.resume.is_none() {
        let path = prompt("Resume file (pdf, doc, docx, txt)")?;
        if path.is_empty() {
            continue;
        }
        if let Err(e) = form.select_file(&PathBuf::from(path)) {
            eprintln!("⚠️  {}", e);
            continue;
        }
        if let Some(ref resume) = form.resume {
            println!("   📄 {} ({})", resume.name, resume.display_size());
        }
    }

    while !form.validate_inputs() {
        let title = prompt("Job title")?;
        form.set_job_title(title);
    }

    Ok(())
}

/// Submit the form once and render the outcome. Returns the exit code.
async fn submit_analysis(
    client: &AnalysisClient,
    renderer: &Renderer,
    form: &mut ReviewForm,
    args: &Args,
    config: &Config,
) -> Result<i32> {
    form.begin_analysis()?;
    debug!("UI state: {:?}", form.state());
    let resume = form
        .resume
        .clone()
        .context("No resume selected")?;

    println!("📤 Submitting {} to {}", resume.name, config.service.endpoint);

    let spinner = (!args.quiet).then(busy_spinner);
    let started = Instant::now();

    let outcome = client
        .analyze(&resume, form.job_title_trimmed(), form.experience_level)
        .await;

    // The busy indicator is cleared on every exit path
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let duration = started.elapsed().as_secs_f64();

    match outcome {
        Ok(outcome) => {
            form.finish_analysis(true);
            info!("Analysis finished in {:.1}s", duration);

            if outcome.truncated {
                warn!("Resume text was truncated before analysis");
            }

            print!(
                "{}",
                renderer.render_results(&outcome.result, outcome.warning.as_deref())
            );

            if let Some(output_path) = config.report.output.clone() {
                save_report(&outcome, &resume.name, form, config, &output_path, duration)?;
                println!("\n✅ Report saved to: {}", output_path.display());
            }

            if let Some(threshold) = args.fail_under {
                if outcome.result.overall_score < threshold {
                    eprintln!(
                        "\n⛔ Overall score {} is below the {} threshold (exit code 2).",
                        outcome.result.overall_score, threshold
                    );
                    return Ok(2);
                }
            }

            Ok(0)
        }
        Err(e) => {
            form.finish_analysis(false);
            warn!("Analysis failed after {:.1}s: {}", duration, e);
            eprint!("{}", renderer.render_error(&e));
            Ok(1)
        }
    }
}

/// Busy indicator for the in-flight request.
fn busy_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Analyzing resume... this can take a few minutes");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Write the analysis out as a Markdown or JSON report.
fn save_report(
    outcome: &AnalysisOutcome,
    resume_name: &str,
    form: &ReviewForm,
    config: &Config,
    output_path: &std::path::Path,
    duration: f64,
) -> Result<()> {
    let metadata = ReportMetadata {
        resume_name: resume_name.to_string(),
        job_title: form.job_title_trimmed().to_string(),
        experience_level: form.experience_level,
        endpoint: config.service.endpoint.clone(),
        analysis_date: Utc::now(),
        duration_seconds: duration,
    };

    let content = match config.report.format {
        OutputFormat::Markdown => render::generate_markdown_report(&outcome.result, &metadata),
        OutputFormat::Json => render::generate_json_report(&outcome.result, &metadata)?,
    };

    std::fs::write(output_path, content)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    Ok(())
}

/// Handle --check: probe /api/health and report.
async fn handle_check(client: &AnalysisClient, renderer: &Renderer) -> Result<i32> {
    println!("🔍 Checking the analysis service...");

    match client.health().await {
        Ok(health) => {
            println!("   Status:  {}", health.status);
            if let Some(service) = health.service {
                println!("   Service: {}", service);
            }
            if let Some(version) = health.version {
                println!("   Version: {}", version);
            }

            if health.status == "running" {
                println!("\n✅ Service is up.");
                Ok(0)
            } else {
                if let Some(e) = health.error {
                    eprintln!("   Error: {}", e);
                }
                eprintln!("\n⛔ Service reported an unhealthy status.");
                Ok(1)
            }
        }
        Err(e) => {
            eprint!("{}", renderer.render_error(&e));
            Ok(1)
        }
    }
}

/// Handle --toggle-theme: flip and persist the preference.
fn handle_toggle_theme(mut config: Config, args: &Args) -> Result<i32> {
    let path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    config.general.theme = config.general.theme.toggled();
    config.save(&path)?;

    println!(
        "{} Theme set to {} (saved to {})",
        config.general.theme.icon(),
        config.general.theme,
        path.display()
    );
    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        if args.toggle_theme && !config_path.exists() {
            debug!("Config file will be created by the theme toggle");
            return Ok(Config::default());
        }
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Read one line from stdin with a prompt.
fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    let bytes = std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    if bytes == 0 {
        anyhow::bail!("Input closed");
    }
    Ok(line.trim().to_string())
}

/// Yes/no prompt, defaulting to no.
fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N]", question))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}
