//! Output formatting for check results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - Appending the plain-text summary to a report file

mod json;
mod report_file;
mod text;

pub use json::JsonFormatter;
pub use report_file::append_report;
pub use text::TextFormatter;

use crate::orchestrator::CheckResult;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Summary only
    Quiet,
    /// Per-requirement status and summary
    #[default]
    Normal,
    /// Adds the latest-release overview of every package
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            color: true,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the full check result
    fn format(&self, result: &CheckResult, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format and write only the qualifying packages
    fn format_summary(&self, result: &CheckResult, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::config::ReportMode;
    use crate::domain::{
        CompatibilityVerdict, Requirement, SupportTimeline, TimelineEntry, UpgradeReport,
    };
    use crate::error::RegistryError;
    use crate::orchestrator::{
        CheckResult, OrchestratorError, Outcome, PackageOutcome, PackageOverview,
    };
    use chrono::{TimeZone, Utc};

    fn overview(latest: &str) -> PackageOverview {
        PackageOverview {
            latest_version: latest.to_string(),
            build_tags: vec!["py2.py3".to_string()],
            runtime_tokens: vec!["2.7".to_string(), "3.8".to_string()],
            target_in_range: true,
        }
    }

    /// One upgradeable, one already latest, one missing
    pub fn upgrade_result() -> CheckResult {
        let mut report = UpgradeReport::new();
        report.insert(
            "2.0",
            CompatibilityVerdict {
                target: "3.8".to_string(),
                score: 3,
                requires_python_support: Some(true),
                trove_versions_support: Some(true),
                wheels_available: Some(true),
            },
        );

        CheckResult {
            mode: ReportMode::Upgradeable,
            target: "3.8".to_string(),
            targets: vec!["3.8".to_string(), "3.7".to_string(), "3.6".to_string()],
            outcomes: vec![
                PackageOutcome {
                    requirement: Requirement::pinned("foo", "1.0"),
                    overview: overview("2.0"),
                    outcome: Outcome::Upgrades(report),
                },
                PackageOutcome {
                    requirement: Requirement::pinned("bar", "1.5"),
                    overview: overview("1.5"),
                    outcome: Outcome::AlreadyLatest,
                },
            ],
            errors: vec![OrchestratorError::RegistryError {
                package: "missing".to_string(),
                source: RegistryError::package_not_found("missing", 404),
            }],
        }
    }

    /// Added-support run with one partially resolved timeline
    pub fn timeline_result() -> CheckResult {
        let mut timeline = SupportTimeline::default();
        timeline.entries.insert(
            "1.1".to_string(),
            TimelineEntry {
                added: vec!["3.6".to_string()],
                released_at: Some(Utc.with_ymd_and_hms(2020, 1, 15, 10, 0, 0).unwrap()),
            },
        );
        timeline.unresolved = vec!["3.8".to_string()];

        CheckResult {
            mode: ReportMode::AddedSupport,
            target: "3.8".to_string(),
            targets: vec!["3.8".to_string(), "3.6".to_string()],
            outcomes: vec![PackageOutcome {
                requirement: Requirement::pinned("foo", "1.0"),
                overview: overview("1.2"),
                outcome: Outcome::Timeline(timeline),
            }],
            errors: Vec::new(),
        }
    }
}
