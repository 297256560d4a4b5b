//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One status line per requirement
//! - Latest-release overview in verbose mode
//! - A summary listing only qualifying packages

use crate::domain::{CompatibilityVerdict, SupportTimeline, UpgradeReport};
use crate::orchestrator::{CheckResult, Outcome, PackageOutcome};
use crate::output::{OutputFormatter, Verbosity};
use colored::{ColoredString, Colorize};
use std::io::Write;

const RULE_WIDTH: usize = 80;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Short status of an outcome
    fn status(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::AlreadyLatest => self.paint("already latest", |s| s.dimmed()),
            Outcome::Upgrades(report) if report.pinned_already_supported => {
                self.paint("already supported", |s| s.dimmed())
            }
            Outcome::Upgrades(report) => match report.newest() {
                Some(newest) => self.paint(
                    &format!("{} upgrade(s), newest {}", report.candidates.len(), newest),
                    |s| s.green(),
                ),
                None => self.paint("no qualifying upgrade", |s| s.yellow()),
            },
            Outcome::Timeline(timeline) if timeline.found() => {
                let added = format!("support added in {} release(s)", timeline.entries.len());
                self.paint(&added, |s| s.green())
            }
            Outcome::Timeline(_) => self.paint("no support declared", |s| s.yellow()),
        }
    }

    fn format_status_line(
        &self,
        outcome: &PackageOutcome,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let requirement = outcome.requirement.to_string();
        writeln!(
            writer,
            "  {:width$} {}",
            requirement,
            self.status(&outcome.outcome),
            width = max_name_len
        )
    }

    fn format_overview(
        &self,
        outcome: &PackageOutcome,
        target: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let overview = &outcome.overview;
        writeln!(writer, "    Top version on registry: {}", overview.latest_version)?;
        writeln!(
            writer,
            "    Wheels available for: {}",
            join_or_none(&overview.build_tags)
        )?;
        writeln!(
            writer,
            "    Classifier versions: {}",
            join_or_none(&overview.runtime_tokens)
        )?;
        writeln!(
            writer,
            "    requires-python supports {}: {}",
            target,
            if overview.target_in_range { "yes" } else { "no" }
        )
    }

    fn format_verdict(
        &self,
        version: &str,
        verdict: &CompatibilityVerdict,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let confirmed = confirmed_signals(verdict);
        writeln!(
            writer,
            "    {} score {} for {} [{}]",
            self.paint(version, |s| s.bright_white().bold()),
            verdict.score,
            verdict.target,
            confirmed.join(", ")
        )
    }

    fn format_upgrades(
        &self,
        report: &UpgradeReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "  Available upgrade versions:")?;
        for (version, verdict) in &report.candidates {
            self.format_verdict(version, verdict, writer)?;
        }
        Ok(())
    }

    fn format_timeline(
        &self,
        timeline: &SupportTimeline,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "  Support added:")?;
        for (version, entry) in &timeline.entries {
            let date = entry
                .released_at
                .map(|d| format!(" ({})", d.format("%Y/%m/%d")))
                .unwrap_or_default();
            writeln!(
                writer,
                "    {} {}{}",
                self.paint(version, |s| s.bright_white().bold()),
                entry.added.join(", "),
                self.paint(&date, |s| s.dimmed())
            )?;
        }
        if !timeline.unresolved.is_empty() {
            writeln!(
                writer,
                "  Never declared: {}",
                self.paint(&timeline.unresolved.join(", "), |s| s.yellow())
            )?;
        }
        Ok(())
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Names of the signals that confirmed support
fn confirmed_signals(verdict: &CompatibilityVerdict) -> Vec<&'static str> {
    [
        ("requires-python", verdict.requires_python_support),
        ("classifiers", verdict.trove_versions_support),
        ("wheels", verdict.wheels_available),
    ]
    .into_iter()
    .filter(|(_, signal)| *signal == Some(true))
    .map(|(name, _)| name)
    .collect()
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &CheckResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Quiet && !result.outcomes.is_empty() {
            let header = format!(
                "Checking requirements ({}, target {})",
                result.mode, result.target
            );
            writeln!(writer, "{}", self.paint(&header, |s| s.bold()))?;

            let max_name_len = result
                .outcomes
                .iter()
                .map(|o| o.requirement.to_string().len())
                .max()
                .unwrap_or(0)
                .max(20);

            for outcome in &result.outcomes {
                self.format_status_line(outcome, max_name_len, writer)?;
                if self.verbosity == Verbosity::Verbose {
                    self.format_overview(outcome, &result.target, writer)?;
                }
            }
            writeln!(writer)?;
        }

        self.format_summary(result, writer)
    }

    fn format_summary(&self, result: &CheckResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let heading = format!("{}:", result.mode.summary_heading());
        writeln!(writer, "{}", self.paint(&heading, |s| s.bold()))?;

        let mut any = false;
        for outcome in result.qualifying() {
            any = true;
            writeln!(writer, "{}", "-".repeat(RULE_WIDTH))?;
            writeln!(writer, "{}", self.paint(&outcome.requirement.name, |s| s.bold()))?;
            writeln!(writer, "  Current version: {}", outcome.requirement.version)?;
            match &outcome.outcome {
                Outcome::Upgrades(report) => self.format_upgrades(report, writer)?,
                Outcome::Timeline(timeline) => self.format_timeline(timeline, writer)?,
                Outcome::AlreadyLatest => {}
            }
        }

        if !any {
            writeln!(writer, "  {}", self.paint("none", |s| s.dimmed()))?;
        }
        Ok(())
    }
}
