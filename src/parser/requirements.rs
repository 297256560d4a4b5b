//! requirements.txt parser
//!
//! Handles pinned lines only:
//! - Exact: `name==1.2.3`
//! - Compatible release: `name~=1.2`
//! - Extras and markers: `name[extra]==1.0 ; python_version < "3"`
//! - Per-requirement options: `name==1.0 --hash=sha256:...`
//!
//! Lines ending in `\` continue on the next line, as in pip-compile output.
//! `-r`/`--requirement` includes are followed relative to the including file
//! when reading from disk. Comments, blank lines, other pip options (`-e`,
//! `-c`, `--index-url`) and unpinned lines are skipped.

use crate::domain::{ConstraintOperator, Requirement};
use crate::error::RequirementError;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:\[[^\]]*\])?\s*(==|~=)\s*([^\s,;]+)\s*$")
        .unwrap()
});

static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:-r\s*|--requirement(?:\s*=\s*|\s+))(\S+)$").unwrap()
});

/// Parse a single logical requirement line
///
/// Returns `None` for lines that carry no pinned requirement, includes
/// among them.
pub fn parse_requirement_line(line: &str) -> Option<Requirement> {
    let line = strip_options(strip_comment(line));
    let line = line.split(';').next().unwrap_or_default().trim();

    if line.is_empty() || line.starts_with('-') {
        return None;
    }

    let Some(caps) = REQUIREMENT_RE.captures(line) else {
        debug!("skipping unpinned requirement line: {}", line);
        return None;
    };

    let operator = ConstraintOperator::from_symbol(caps.get(2)?.as_str())?;
    Some(Requirement::new(
        caps.get(1)?.as_str(),
        operator,
        caps.get(3)?.as_str(),
    ))
}

/// Parse requirements file content
///
/// Includes cannot be resolved without a file location and are skipped
/// with a warning; use [`read_requirements`] to follow them.
pub fn parse_requirements(content: &str) -> Vec<Requirement> {
    logical_lines(content)
        .iter()
        .filter_map(|line| {
            if let Some(target) = include_target(line) {
                warn!("skipping include of {}: no base file to resolve it from", target);
                return None;
            }
            parse_requirement_line(line)
        })
        .collect()
}

/// Read and parse a requirements file, following `-r` includes
pub fn read_requirements(path: &Path) -> Result<Vec<Requirement>, RequirementError> {
    let mut requirements = Vec::new();
    let mut visited = HashSet::new();
    collect_file(path, &mut visited, &mut requirements)?;
    Ok(requirements)
}

fn collect_file(
    path: &Path,
    visited: &mut HashSet<PathBuf>,
    requirements: &mut Vec<Requirement>,
) -> Result<(), RequirementError> {
    let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(key) {
        debug!("{} already included, skipping", path.display());
        return Ok(());
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| RequirementError::read(path, e))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    for line in logical_lines(&content) {
        match include_target(&line) {
            Some(target) => {
                let included = base.join(target);
                debug!("following include {}", included.display());
                collect_file(&included, visited, requirements)?;
            }
            None => requirements.extend(parse_requirement_line(&line)),
        }
    }
    Ok(())
}

/// Join `\`-continued physical lines into logical lines
///
/// A line carrying a comment never continues, matching pip.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for line in content.lines() {
        let continued = line
            .trim_end()
            .strip_suffix('\\')
            .filter(|_| strip_comment(line).len() == line.len());
        match continued {
            Some(head) => {
                current.push_str(head);
                current.push(' ');
            }
            None => {
                current.push_str(line);
                lines.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.trim().is_empty() {
        lines.push(current);
    }
    lines
}

/// Target of an `-r`/`--requirement` line
fn include_target(line: &str) -> Option<&str> {
    let line = strip_comment(line).trim();
    INCLUDE_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Drop a trailing comment (`#` at line start or after whitespace)
fn strip_comment(line: &str) -> &str {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return "";
    }
    match line.find(" #").or_else(|| line.find("\t#")) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Drop per-requirement options such as `--hash=...` after the specifier
fn strip_options(line: &str) -> &str {
    match line.find(" --").or_else(|| line.find("\t--")) {
        Some(idx) => &line[..idx],
        None => line,
    }
}
