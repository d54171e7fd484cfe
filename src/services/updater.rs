//! Glossary updater
//!
//! One load-scan-merge-store cycle per call. Nothing is cached between
//! runs and the glossary file is rewritten only when a record was added
//! or refreshed.

use crate::config::Settings;
use crate::models::glossary::now_timestamp;
use crate::models::{ErrorMatch, Glossary};
use crate::providers::Provider;
use crate::services::classifier::create_error_entry;
use crate::services::scanner::scan_log;
use crate::services::store::{load_glossary, save_glossary};
use crate::utils::error::{AppResult, ErrorContext};
use crate::utils::logging::preview;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Summary of a newly added glossary record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedError {
    pub code: String,
    pub http_status_code: u16,
    pub provider: Provider,
    pub message: String,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// Glossary rewritten
    Updated,
    /// Nothing matched or changed, file untouched
    NoChanges,
    /// Changes found but could not be written
    WriteFailed(String),
}

/// Result of a single update run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub added: Vec<AddedError>,
    /// Existing records whose `last_seen` was refreshed
    pub refreshed: usize,
    pub outcome: UpdateOutcome,
}

impl UpdateReport {
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || self.refreshed > 0
    }

    /// Whether the run finished without a write failure
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, UpdateOutcome::WriteFailed(_))
    }
}

/// Counts produced by merging scan results into a glossary
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub added: Vec<AddedError>,
    pub refreshed: usize,
}

/// Updates a glossary file from a worker log
#[derive(Debug, Clone)]
pub struct GlossaryUpdater {
    log_path: PathBuf,
    glossary_path: PathBuf,
}

impl GlossaryUpdater {
    pub fn new(log_path: impl Into<PathBuf>, glossary_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            glossary_path: glossary_path.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.paths.log_path, &settings.paths.glossary_path)
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn glossary_path(&self) -> &Path {
        &self.glossary_path
    }

    /// Run one update cycle
    ///
    /// Returns `Err` only when the log or an existing glossary file cannot
    /// be read; in that case the glossary is left untouched.
    pub fn run(&self) -> AppResult<UpdateReport> {
        let log_content = match read_log(&self.log_path) {
            Ok(content) => content,
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        };

        let mut glossary = load_glossary(&self.glossary_path).map_err(|e| {
            error!("Error reading glossary file: {}", e);
            e
        })?;

        let matches = scan_log(&log_content);
        debug!("Found {} error occurrences in {:?}", matches.len(), self.log_path);

        let stats = merge_matches(&mut glossary, &matches);
        let mut report = UpdateReport {
            added: stats.added,
            refreshed: stats.refreshed,
            outcome: UpdateOutcome::NoChanges,
        };

        if !report.changed() {
            info!("No new LLM errors found or glossary already up to date.");
            return Ok(report);
        }

        report.outcome = match save_glossary(&self.glossary_path, &glossary) {
            Ok(()) => {
                info!(
                    "Glossary updated successfully at {:?} ({} added, {} refreshed)",
                    self.glossary_path,
                    report.added.len(),
                    report.refreshed
                );
                UpdateOutcome::Updated
            }
            Err(e) => {
                error!("Error writing glossary file: {}", e);
                UpdateOutcome::WriteFailed(e.to_string())
            }
        };

        Ok(report)
    }
}

/// Update the glossary at `glossary_path` from the log at `log_path`
pub fn update_glossary(log_path: &Path, glossary_path: &Path) -> AppResult<UpdateReport> {
    GlossaryUpdater::new(log_path, glossary_path).run()
}

/// Merge scan results into a glossary, deduplicating by content key
pub fn merge_matches(glossary: &mut Glossary, matches: &[ErrorMatch]) -> MergeStats {
    let mut stats = MergeStats::default();

    for found in matches {
        let message = found.message();
        if message.is_empty() {
            continue;
        }

        if let Some(existing) = glossary.find_mut(&found.provider, found.http_status_code, message) {
            existing.touch(&now_timestamp());
            stats.refreshed += 1;
            debug!(
                "Refreshed {} (HTTP {}) from {}",
                existing.code, existing.http_status_code, existing.provider
            );
            continue;
        }

        let record = create_error_entry(
            found.provider.clone(),
            found.http_status_code,
            found.details.code.as_deref(),
            message,
            found.details.reason.as_deref(),
        );

        info!(
            "Added new error to glossary: {} (HTTP {}) from {}: {}",
            record.code,
            record.http_status_code,
            record.provider,
            preview(message)
        );

        stats.added.push(AddedError {
            code: record.code.clone(),
            http_status_code: record.http_status_code,
            provider: record.provider.clone(),
            message: message.to_string(),
        });
        glossary.push(record);
    }

    stats
}

/// Read the whole log; invalid UTF-8 sequences are replaced, not rejected
fn read_log(path: &Path) -> AppResult<String> {
    let bytes = fs::read(path).log_read_context(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
