//! TestLens - JUnit XML test-report analyzer
//!
//! A CLI tool that parses JUnit-style XML test reports, summarizes
//! pass/fail counts and execution times, and can push the results to a
//! local Ollama model for free-text questions.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable file, malformed report, LLM failure)
//!   2 - Failed cases found with --fail-on-failures

mod analysis;
mod cli;
mod config;
mod llm;
mod models;
mod parser;
mod report;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use models::Report;
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

    // Initialize logging
    init_logging(&args);

    info!("TestLens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the analysis
    match run_analysis(args).await {
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

/// Handle --init-config: generate a default .testlens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".testlens.toml");

    if path.exists() {
        eprintln!("⚠️  .testlens.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .testlens.toml")?;

    println!("✅ Created .testlens.toml with default settings.");
    println!("   Edit it to customize model, selection limit, and output.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

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

/// Run the complete analysis workflow. Returns exit code (0 or 2).
async fn run_analysis(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let report_path = args
        .report
        .clone()
        .context("A report file is required")?;

    // Step 1: Read the report into memory
    println!("📄 Reading report: {}", report_path.display());
    let source = std::fs::read_to_string(&report_path)
        .with_context(|| format!("Failed to read report file: {}", report_path.display()))?;

    // Step 2: Parse and aggregate
    let limit = config.parser.case_limit;
    if let Some(limit) = limit {
        info!("Selection limit: first {} cases in document order", limit);
    }

    let aggregate = parser::parse_report(&source, limit)?;
    let parsed = Report::from_aggregate(&report_path.display().to_string(), &aggregate);
    let stats = &parsed.summary;

    // Step 3: Render the report
    let rendered = match args.format {
        OutputFormat::Text => report::generate_text_report(&parsed),
        OutputFormat::Markdown => report::generate_markdown_report(&parsed),
        OutputFormat::Json => report::generate_json_report(&parsed)?,
    };

    match config.general.output {
        Some(ref path) => {
            let path = std::path::Path::new(path);
            report::write_report(&rendered, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("✅ Report saved to: {}", path.display());
        }
        None => {
            println!("{}", rendered);
        }
    }

    // Step 4: Console summary
    println!("📊 Analysis Summary:");
    println!(
        "   Declared: {} tests, {} failures",
        aggregate.total_declared, aggregate.failures_declared
    );
    println!(
        "   Selected: {} cases (✅ {} passed | ❌ {} failed)",
        stats.selected(),
        stats.passed,
        stats.failed
    );
    if let Some(durations) = stats.durations {
        println!(
            "   Execution time: avg {:.2}s | max {:.2}s | min {:.2}s",
            durations.mean, durations.max, durations.min
        );
    }

    // Step 5: Optional LLM push/query
    if args.wants_llm() {
        run_llm_actions(&args, &config, &parsed).await?;
    }

    // Check --fail-on-failures threshold
    if args.fail_on_failures && stats.failed > 0 {
        eprintln!(
            "\n⛔ {} failed case(s) in selection. Failing (exit code 2).",
            stats.failed
        );
        return Ok(2);
    }

    Ok(0)
}

/// Push the parsed results to Ollama and/or ask the requested question.
async fn run_llm_actions(args: &Args, config: &Config, parsed: &Report) -> Result<()> {
    let llm_config = llm::LlmConfig {
        ollama_url: config.model.ollama_url.clone(),
        model_name: config.model.name.clone(),
        temperature: config.model.temperature,
        timeout_seconds: config.model.timeout_seconds,
    };

    println!("\n🤖 Model: {}", llm_config.model_name);
    println!("   Ollama: {}", llm_config.ollama_url);

    let client = llm::OllamaClient::new(llm_config);

    if args.push {
        println!("\n📤 Pushing test results to Ollama...");
        let payload = report::generate_text_report(parsed);
        client.push(&payload).await?;
        println!("✅ Test results pushed to Ollama successfully!");
    }

    if let Some(ref question) = args.ask {
        println!("\n💬 Question: {}", question);
        match client.query(question).await? {
            Some(answer) => {
                println!("\nAnswer:\n{}", answer.trim());
            }
            None => {
                println!("\nNo response received.");
            }
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .testlens.toml");
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
