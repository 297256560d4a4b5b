//! Report file writer
//!
//! Appends the plain-text summary of each run, so repeated runs accumulate.

use crate::orchestrator::CheckResult;
use crate::output::{OutputFormatter, TextFormatter, Verbosity};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append the uncolored summary of `result` to `path`, creating it if needed
pub fn append_report(path: &Path, result: &CheckResult) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    TextFormatter::with_color(Verbosity::Quiet, false).format_summary(result, &mut file)?;
    file.flush()
}
