//! newscorr command-line entry point.
//!
//! `prices` computes indicators and return metrics per ticker, `correlate`
//! relates headline sentiment to next-session returns, `run` does both in
//! order.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use newscorr::application::batch::{CorrelationBatch, PriceBatch};
use newscorr::application::engine::CorrelationEngine;
use newscorr::config::{AnalysisConfig, InterpretationMode, parse_ticker_list};
use newscorr::infrastructure::sentiment::VaderScorer;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "News sentiment vs. stock return correlation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Comma-separated list of tickers
    #[arg(short, long, global = true)]
    tickers: Option<String>,

    /// Directory holding <TICKER>.csv price files and, by default, the news feed
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory for generated artifacts
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Headline feed CSV
    #[arg(long, global = true)]
    news_file: Option<PathBuf>,

    /// Label undefined coefficients "Strong Negative" instead of "Insufficient Data"
    #[arg(long, global = true)]
    legacy_labels: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute technical indicators and performance metrics
    Prices,
    /// Correlate daily headline sentiment with next-session returns
    Correlate,
    /// Run the price analysis, then the correlation analysis
    Run,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if let Some(tickers) = &self.tickers {
            config.tickers = parse_ticker_list(tickers);
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(path) = &self.news_file {
            config.news.news_path = Some(path.clone());
        }
        if self.legacy_labels {
            config.interpretation_mode = InterpretationMode::Legacy;
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = AnalysisConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;
    info!(
        "Tickers: {} | output: {} | labels: {:?}",
        config.tickers.join(", "),
        config.output_dir.display(),
        config.interpretation_mode
    );

    match cli.command {
        Commands::Prices => run_prices(&config)?,
        Commands::Correlate => run_correlation(&config)?,
        Commands::Run => {
            run_prices(&config)?;
            run_correlation(&config)?;
        }
    }

    info!("Done");
    Ok(())
}

fn run_prices(config: &AnalysisConfig) -> Result<()> {
    let summary = PriceBatch::new(config)
        .context("Failed to prepare price analysis")?
        .run()
        .context("Price analysis failed")?;

    for (ticker, reason) in &summary.skipped {
        info!("{} skipped: {}", ticker, reason);
    }
    if let Some(path) = &summary.summary_path {
        info!("Performance summary saved to {}", path.display());
    }
    Ok(())
}

fn run_correlation(config: &AnalysisConfig) -> Result<()> {
    let scorer = VaderScorer::with_keyword_boost(config.finance_keyword_boost);
    let engine = CorrelationEngine::new(Box::new(scorer), config.interpretation_mode);

    let summary = CorrelationBatch::new(config, engine)
        .context("Failed to prepare correlation analysis")?
        .run()
        .context("Correlation analysis failed")?;

    info!(
        "{} of {} tickers analyzed; report saved to {}",
        summary.analyzed(),
        summary.entities.len(),
        summary.report_path.display()
    );
    Ok(())
}
