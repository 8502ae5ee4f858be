//! Modmap main entry point
//!
//! This is the command-line interface for the modmap documentation analyzer.

use anyhow::Context;
use clap::Parser;
use modmap::config::{load_config_with_hash, Config};
use modmap::output::{generate_markdown_report, write_json_report};
use modmap::{run_pipeline, Crawler, OpenAiStructurer};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Modmap: documentation-to-module-map analyzer
///
/// Modmap crawls documentation websites under strict page, depth, time, and
/// content budgets, then asks an OpenAI-compatible model to structure the
/// collected text into product modules and submodules.
#[derive(Parser, Debug)]
#[command(name = "modmap")]
#[command(version = "0.1.0")]
#[command(about = "Crawl documentation sites and map their product modules", long_about = None)]
struct Cli {
    /// Seed URLs to analyze
    #[arg(value_name = "URL", required_unless_present = "dry_run")]
    urls: Vec<String>,

    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be analyzed without crawling
    #[arg(long, conflicts_with = "crawl_only")]
    dry_run: bool,

    /// Crawl and print the collected text, skipping the structuring service
    #[arg(long, conflicts_with_all = ["output", "json"])]
    crawl_only: bool,

    /// Override the markdown report path from the config
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Override the JSON report path from the config
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &cli.urls);
        return Ok(());
    }

    if cli.crawl_only {
        handle_crawl_only(&config, &cli.urls).await
    } else {
        handle_analyze(&config, &cli).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("modmap=info,warn"),
            1 => EnvFilter::new("modmap=debug,info"),
            2 => EnvFilter::new("modmap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &Config, urls: &[String]) {
    println!("=== Modmap Dry Run ===\n");

    println!("Crawl Budgets:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Max content length: {} chars",
        config.crawler.max_content_length
    );
    println!("  Page timeout: {}s", config.crawler.page_timeout_secs);
    println!("  Total time budget: {}s", config.crawler.max_total_time_secs);
    println!("  Retries per page: {}", config.crawler.retries);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);

    println!("\nStructuring Service:");
    println!("  Model: {}", config.extractor.model);
    println!("  API base: {}", config.extractor.api_base);
    println!("  Temperature: {}", config.extractor.temperature);
    println!("  Max tokens: {}", config.extractor.max_tokens);
    println!(
        "  Request timeout: {}s",
        config.extractor.request_timeout_secs
    );

    println!("\nPipeline:");
    println!("  Per-URL timeout: {}s", config.pipeline.url_timeout_secs);

    println!("\nOutput:");
    println!("  Markdown report: {}", config.output.summary_path);
    println!("  JSON report: {}", config.output.modules_path);

    println!("\n✓ Configuration is valid");
    if !urls.is_empty() {
        println!("✓ Would analyze {} seed URL(s)", urls.len());
        for url in urls {
            println!("    * {}", url);
        }
    }
}

/// Handles the --crawl-only mode: prints collected text per seed URL
async fn handle_crawl_only(config: &Config, urls: &[String]) -> anyhow::Result<()> {
    let crawler = Crawler::new(config)?;
    let url_timeout = Duration::from_secs(config.pipeline.url_timeout_secs);
    let mut failed: Vec<&String> = Vec::new();

    for url in urls {
        match tokio::time::timeout(url_timeout, crawler.crawl(url)).await {
            Ok(content) if !content.trim().is_empty() => {
                println!("=== Content from {} ===\n", url);
                println!("{}\n", content);
            }
            _ => failed.push(url),
        }
    }

    if !failed.is_empty() {
        println!("No content could be crawled from:");
        for url in &failed {
            println!("  - {}", url);
        }
    }

    Ok(())
}

/// Handles the main analyze operation: crawl, structure, write reports
async fn handle_analyze(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    let crawler = Crawler::new(config)?;
    let structurer = OpenAiStructurer::from_env(&config.extractor)
        .context("the structuring service requires the OPENAI_API_KEY environment variable")?;

    let url_timeout = Duration::from_secs(config.pipeline.url_timeout_secs);
    let report = run_pipeline(&crawler, &structurer, &cli.urls, url_timeout).await?;

    let summary_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.summary_path));
    let modules_path = cli
        .json
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.modules_path));

    generate_markdown_report(&report, &summary_path)
        .with_context(|| format!("failed to write markdown report to {}", summary_path.display()))?;
    write_json_report(&report, &modules_path)
        .with_context(|| format!("failed to write JSON report to {}", modules_path.display()))?;

    println!(
        "✓ Analyzed {} source(s), {} failed",
        report.results.len(),
        report.failed_urls.len()
    );
    println!("✓ {} module(s) identified", report.total_modules());
    println!("✓ Markdown report: {}", summary_path.display());
    println!("✓ JSON report: {}", modules_path.display());

    Ok(())
}
