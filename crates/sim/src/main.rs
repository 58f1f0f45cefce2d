//! Balance simulation entry point.
//!
//! Runs a Monte Carlo sweep configured through `CODEQUEST_*` environment
//! variables and prints the report to stdout. Logs go to stderr.
mod config;

use anyhow::{Context, Result};
use codequest_content::{ConfigLoader, ContentFactory, LoadedContent};
use codequest_core::Severity;
use codequest_runtime::simulation::PROGRESSION_LEVELS;
use codequest_runtime::{
    format_csv, format_report, run_full_simulation, run_progression_simulation,
};
use config::{CliConfig, Mode, OutputFormat};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = CliConfig::from_env();
    tracing::info!(
        mode = %config.mode,
        format = %config.format,
        trials = config.simulation.trials,
        seed = config.simulation.base_seed,
        "starting simulation"
    );

    let content = load_content(&config)?;
    let env = content.env();

    let output = match config.mode {
        Mode::Full => {
            let report = run_full_simulation(
                config.level,
                config.severity,
                config.complexity,
                &config.simulation,
                env,
            );
            match config.format {
                OutputFormat::Text => format_report(&report),
                OutputFormat::Csv => format_csv(&report.matchups),
                OutputFormat::Json => serde_json::to_string_pretty(&report)
                    .context("Failed to encode simulation report")?,
            }
        }
        Mode::Progression => {
            let severities: Vec<Severity> = Severity::all().collect();
            let results = run_progression_simulation(
                config.class,
                &PROGRESSION_LEVELS,
                &severities,
                &config.simulation,
                env,
            );
            match config.format {
                OutputFormat::Json => serde_json::to_string_pretty(&results)
                    .context("Failed to encode progression results")?,
                OutputFormat::Text | OutputFormat::Csv => format_csv(&results),
            }
        }
    };

    println!("{output}");
    Ok(())
}

/// Logs to stderr so reports on stdout stay machine-readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_content(config: &CliConfig) -> Result<LoadedContent> {
    let mut content = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir)
            .load_all()
            .with_context(|| format!("Failed to load content from {}", dir.display()))?,
        None => LoadedContent::default(),
    };

    if let Some(balance) = &config.balance {
        content.balance = ConfigLoader::resolve(balance)
            .with_context(|| format!("Failed to resolve balance '{balance}'"))?;
        tracing::info!(balance = %balance, "balance override applied");
    }
    Ok(content)
}
