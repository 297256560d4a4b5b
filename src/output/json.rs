//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of check results
//! - Per-requirement status with upgrade candidates or support timeline

use crate::config::ReportMode;
use crate::domain::{ConstraintOperator, SupportTimeline, UpgradeReport};
use crate::orchestrator::{CheckResult, Outcome, PackageOutcome, PackageOverview};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    mode: ReportMode,
    target: &'a str,
    targets: &'a [String],
    /// Per-requirement results
    packages: Vec<JsonPackage<'a>>,
    /// Errors encountered
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// JSON representation of one requirement
#[derive(Serialize)]
struct JsonPackage<'a> {
    name: &'a str,
    version: &'a str,
    operator: ConstraintOperator,
    status: &'static str,
    /// Latest-release overview (verbose only)
    #[serde(skip_serializing_if = "Option::is_none")]
    overview: Option<&'a PackageOverview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upgrades: Option<&'a UpgradeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeline: Option<&'a SupportTimeline>,
}

impl JsonFormatter {
    /// Machine-readable status of an outcome
    fn status(outcome: &Outcome) -> &'static str {
        match outcome {
            Outcome::AlreadyLatest => "already_latest",
            Outcome::Upgrades(report) if report.pinned_already_supported => "already_supported",
            Outcome::Upgrades(report) if report.found() => "upgradeable",
            Outcome::Upgrades(_) => "no_upgrade",
            Outcome::Timeline(timeline) if timeline.found() => "support_added",
            Outcome::Timeline(_) => "no_support_declared",
        }
    }

    fn package_to_json<'a>(&self, outcome: &'a PackageOutcome) -> JsonPackage<'a> {
        let (upgrades, timeline) = match &outcome.outcome {
            Outcome::Upgrades(report) if report.found() => (Some(report), None),
            Outcome::Timeline(timeline) if timeline.found() => (None, Some(timeline)),
            _ => (None, None),
        };

        JsonPackage {
            name: &outcome.requirement.name,
            version: &outcome.requirement.version,
            operator: outcome.requirement.constraint_operator,
            status: Self::status(&outcome.outcome),
            overview: (self.verbosity == Verbosity::Verbose).then_some(&outcome.overview),
            upgrades,
            timeline,
        }
    }

    fn write_json<'a>(
        &self,
        result: &'a CheckResult,
        outcomes: impl Iterator<Item = &'a PackageOutcome>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonOutput {
            mode: result.mode,
            target: &result.target,
            targets: &result.targets,
            packages: outcomes.map(|o| self.package_to_json(o)).collect(),
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
        };

        let json = serde_json::to_string_pretty(&output)
            .map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &CheckResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(result, writer);
        }
        self.write_json(result, result.outcomes.iter(), writer)
    }

    fn format_summary(&self, result: &CheckResult, writer: &mut dyn Write) -> std::io::Result<()> {
        self.write_json(result, result.qualifying(), writer)
    }
}
