//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// dxcheck - Developer experience health check analyzer
///
/// Scores an AI-adoption survey submission, flags risky patterns,
/// recommends next steps, and asks GitHub Models for a written insight
/// (falling back to a local summary when the model is unavailable).
///
/// Examples:
///   dxcheck --input survey.json
///   dxcheck --input survey.json --format markdown -o report.md
///   ANALYSIS_DATA="$(cat survey.json)" dxcheck --offline
///   cat survey.json | dxcheck --fail-on-risk
///   dxcheck --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Survey JSON file to analyze
    ///
    /// Takes precedence over --data. When neither is given, the survey is
    /// read from stdin.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Survey JSON passed inline
    #[arg(long, value_name = "JSON", env = "ANALYSIS_DATA", hide_env_values = true)]
    pub data: Option<String>,

    /// Output file path for the analysis
    ///
    /// Defaults to analysis-results.json or the config file's general.output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (json, markdown)
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Remote model used for insights
    #[arg(short, long, env = "DXCHECK_MODEL")]
    pub model: Option<String>,

    /// Inference API base URL
    #[arg(long, value_name = "URL", env = "DXCHECK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Temperature for the remote model (0.0 - 2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Remote request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip the remote model and use the local summary
    #[arg(long)]
    pub offline: bool,

    /// Exit with code 2 when any risk flag fires
    ///
    /// Useful for CI pipelines that gate on survey health.
    #[arg(long)]
    pub fail_on_risk: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .dxcheck.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .dxcheck.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// Markdown format
    Markdown,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate endpoint URL format (not needed offline)
        if !self.offline {
            if let Some(ref endpoint) = self.endpoint {
                if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                    return Err("Endpoint URL must start with 'http://' or 'https://'".to_string());
                }
            }
        }

        // Validate temperature range
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err("Temperature must be between 0.0 and 2.0".to_string());
            }
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // An unreadable --input is reported through the fallback results file
        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the config file's `general.verbose`; `--quiet` wins over it.
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
            input: None,
            data: Some("{}".to_string()),
            output: None,
            format: OutputFormat::Json,
            model: None,
            endpoint: None,
            temperature: None,
            timeout: None,
            offline: false,
            fail_on_risk: false,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "dxcheck",
            "--data",
            "{}",
            "--format",
            "markdown",
            "--offline",
            "--fail-on-risk",
        ])
        .unwrap();

        assert_eq!(args.format, OutputFormat::Markdown);
        assert!(args.offline);
        assert!(args.fail_on_risk);
        assert_eq!(args.data.as_deref(), Some("{}"));
    }

    #[test]
    fn test_validation_invalid_endpoint() {
        let mut args = make_args();
        args.endpoint = Some("models.github.ai".to_string());
        assert!(args.validate().is_err());

        args.offline = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_temperature_and_timeout() {
        let mut args = make_args();
        args.temperature = Some(2.5);
        assert!(args.validate().is_err());

        args.temperature = Some(0.7);
        args.timeout = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_missing_input_file() {
        let mut args = make_args();
        args.input = Some(PathBuf::from("/definitely/not/here.json"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }
}
