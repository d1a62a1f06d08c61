//! dxcheck - Developer experience health check analyzer
//!
//! A CLI tool that scores an AI-adoption survey submission, raises risk
//! flags, recommends next steps, and asks GitHub Models for a written
//! insight, falling back to a local summary when the model is unavailable.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Survey data could not be analyzed, or a runtime error occurred
//!   2 - Risk flags were raised and --fail-on-risk is set

mod analysis;
mod cli;
mod config;
mod models;
mod provider;
mod report;

use anyhow::{bail, Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, ModelConfig, CONFIG_FILE_NAME};
use indicatif::{ProgressBar, ProgressStyle};
use models::AnalysisOutcome;
use provider::{GitHubModelsClient, GitHubModelsConfig, InsightProvider};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
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

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(args.log_level(config.general.verbose))?;

    info!("dxcheck v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_analysis(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .dxcheck.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the model, endpoint, and report output.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Run the analysis workflow. Returns the process exit code.
async fn run_analysis(args: Args, mut config: Config) -> Result<i32> {
    config.merge_with_args(&args);
    debug!("Effective configuration: {:?}", config);

    let outcome = match read_input(input_source(&args)) {
        Ok(raw) => {
            let client = build_provider(&config.model);
            let provider = client.as_ref().map(|c| c as &dyn InsightProvider);

            let spinner = insight_spinner(provider.is_some() && !args.quiet);
            let outcome = analysis::analyze_json(&raw, provider).await;
            spinner.finish_and_clear();

            outcome
        }
        Err(e) => unreadable_input(&e),
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&outcome)?,
        OutputFormat::Markdown => {
            report::generate_markdown_report(&outcome, config.report.decimals)
        }
    };

    let output_path = PathBuf::from(&config.general.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write results to {}", output_path.display()))?;

    if !args.quiet {
        print_summary(&outcome, &output_path);
    }

    let code = exit_code(&outcome, args.fail_on_risk);
    if code == 2 {
        eprintln!(
            "\n⛔ {} risk flag(s) raised. Failing (exit code 2).",
            outcome.risk_flags().len()
        );
    }

    Ok(code)
}

/// Process exit code for a finished analysis.
fn exit_code(outcome: &AnalysisOutcome, fail_on_risk: bool) -> i32 {
    if outcome.is_failed() {
        1
    } else if fail_on_risk && !outcome.risk_flags().is_empty() {
        2
    } else {
        0
    }
}

/// Where the raw survey JSON is read from.
#[derive(Debug, PartialEq)]
enum InputSource<'a> {
    File(&'a Path),
    Inline(&'a str),
    Stdin,
}

/// Pick the survey source: --input, then --data/ANALYSIS_DATA, then stdin.
fn input_source(args: &Args) -> InputSource<'_> {
    if let Some(ref path) = args.input {
        InputSource::File(path)
    } else if let Some(ref data) = args.data {
        InputSource::Inline(data)
    } else {
        InputSource::Stdin
    }
}

/// Read the raw survey JSON from the chosen source.
fn read_input(source: InputSource<'_>) -> Result<String> {
    match source {
        InputSource::File(path) => {
            info!("Reading survey from: {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read survey file: {}", path.display()))
        }
        InputSource::Inline(data) => {
            debug!("Reading survey from --data / ANALYSIS_DATA");
            Ok(data.to_string())
        }
        InputSource::Stdin => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                bail!("No survey data provided. Use --input, --data, ANALYSIS_DATA, or pipe JSON on stdin");
            }

            let mut raw = String::new();
            stdin
                .read_to_string(&mut raw)
                .context("Failed to read survey data from stdin")?;
            Ok(raw)
        }
    }
}

/// Degraded record for a survey source that could not be read.
fn unreadable_input(e: &anyhow::Error) -> AnalysisOutcome {
    error!("Could not read survey data: {:#}", e);
    AnalysisOutcome::Failed(analysis::failed_analysis(&format!("{:#}", e)))
}

/// Build the remote insight client, or `None` when insights are disabled.
fn build_provider(model: &ModelConfig) -> Option<GitHubModelsClient> {
    if !model.enabled {
        info!("Remote insights disabled; using local summary");
        return None;
    }

    match GitHubModelsClient::from_env(GitHubModelsConfig::from(model), &model.token_env) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Could not create GitHub Models client: {}", e);
            None
        }
    }
}

/// Spinner shown while waiting on the remote model.
fn insight_spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Generating insights...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print a short console summary of the outcome.
fn print_summary(outcome: &AnalysisOutcome, output_path: &Path) {
    if outcome.is_failed() {
        println!("\n❌ Analysis failed. Fallback results written to: {}", output_path.display());
        return;
    }

    println!("\n📊 Analysis Summary:");
    println!("   Overall Score: {:.2}/5.0", outcome.overall_score());
    println!("   Risk Flags: {}", outcome.risk_flags().len());
    println!("   Recommendations: {}", outcome.recommendations().len());

    if !outcome.risk_flags().is_empty() {
        println!("\n⚠️  Risk flags identified:");
        for flag in outcome.risk_flags() {
            println!("   - {}", flag);
        }
    }

    println!(
        "\n✅ Analysis complete! Results saved to: {}",
        output_path.display()
    );
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    Ok(Config::load_default()?.unwrap_or_default())
}
