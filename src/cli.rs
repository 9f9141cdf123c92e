//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// TestLens - JUnit XML test-report analyzer with Ollama-backed Q&A
///
/// Parse a JUnit-style XML report, summarize pass/fail counts and
/// execution times, render text/Markdown/JSON reports, and optionally
/// push the summary to a local Ollama model or ask it questions.
///
/// Examples:
///   testlens results.xml
///   testlens results.xml --limit 100 --format markdown --output report.md
///   testlens results.xml --push --ask "Which tests failed and why?"
///   testlens results.xml --fail-on-failures
///   testlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the JUnit XML report to analyze
    ///
    /// Not required when using --init-config.
    #[arg(value_name = "REPORT", required_unless_present = "init_config")]
    pub report: Option<PathBuf>,

    /// Maximum number of test cases to materialize
    ///
    /// Keeps the first N cases in document order; the rest of the report
    /// still contributes to the declared totals. Unset keeps every case.
    #[arg(short, long, value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Output format (text, markdown, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the rendered report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Push the parsed summary to Ollama for indexing
    #[arg(long)]
    pub push: bool,

    /// Ask the model a free-text question about the parsed results
    #[arg(long, value_name = "QUESTION")]
    pub ask: Option<String>,

    /// Ollama model to use for --push and --ask
    ///
    /// Can also be set via TESTLENS_MODEL env var or .testlens.toml config.
    #[arg(short, long, default_value = "llama3", env = "TESTLENS_MODEL")]
    pub model: String,

    /// Ollama API endpoint URL
    #[arg(long, default_value = "http://localhost:11434", env = "OLLAMA_URL")]
    pub ollama_url: String,

    /// Temperature for LLM responses (0.0 - 1.0)
    #[arg(long, default_value = "0.1")]
    pub temperature: f32,

    /// Request timeout in seconds for LLM calls
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .testlens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Exit with code 2 when any selected case failed
    ///
    /// Useful for CI pipelines.
    #[arg(long)]
    pub fail_on_failures: bool,

    /// Generate a default .testlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether any LLM call was requested.
    pub fn wants_llm(&self) -> bool {
        self.push || self.ask.is_some()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate the report path
        match self.report {
            Some(ref path) => {
                if !path.exists() {
                    return Err(format!("Report file does not exist: {}", path.display()));
                }
                if !path.is_file() {
                    return Err(format!("Report path is not a file: {}", path.display()));
                }
            }
            None => return Err("A report file is required".to_string()),
        }

        // Validate Ollama URL format (only needed for LLM calls)
        if self.wants_llm()
            && !self.ollama_url.starts_with("http://")
            && !self.ollama_url.starts_with("https://")
        {
            return Err("Ollama URL must start with 'http://' or 'https://'".to_string());
        }

        // Validate temperature range
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err("Temperature must be between 0.0 and 1.0".to_string());
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

        if let Some(ref question) = self.ask {
            if question.trim().is_empty() {
                return Err("Question for --ask must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
