//! LLM Error Glossary
//!
//! Reads a worker log, extracts LLM provider errors, and updates the
//! JSON error glossary next to it

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};

use llm_error_glossary::utils::logging::init_logging;
use llm_error_glossary::{version_info, GlossaryError, GlossaryUpdater, Settings};

#[derive(Parser, Debug)]
#[command(name = "llm-error-glossary")]
#[command(
    author,
    version,
    about = "Extract LLM provider errors from a worker log into a JSON glossary"
)]
struct Cli {
    /// Worker log to scan [default: ./worker.log or $LLM_ERROR_LOG_PATH]
    log_path: Option<PathBuf>,

    /// Glossary file to update [default: ./llm_error_glossary.json or $LLM_ERROR_GLOSSARY_PATH]
    glossary_path: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            // logging is not initialized yet
            eprintln!("Configuration error: {:#}", e);
            process::exit(GlossaryError::Config(e).exit_code());
        }
    };

    init_logging(&settings.logging);
    debug!("{}", version_info());
    info!(
        "Scanning {:?} into {:?}",
        settings.paths.log_path, settings.paths.glossary_path
    );

    let updater = GlossaryUpdater::from_settings(&settings);
    match updater.run() {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Failed to serialize report: {}", e),
                }
            }
            if !report.is_success() {
                process::exit(1);
            }
        }
        Err(e) => process::exit(e.exit_code()),
    }
}

/// Environment settings with command line overrides applied
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = Settings::new().context("Failed to load settings")?;
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    }
    settings
        .with_paths(cli.log_path.clone(), cli.glossary_path.clone())
        .context("Invalid command line paths")
}
