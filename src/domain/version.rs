//! PEP 440 version ordering
//!
//! Every sort, max and "newer than" decision routes through these helpers so
//! that release versions are never compared as plain strings.

use crate::error::CompatError;
use pep508_rs::pep440_rs::Version;
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::warn;

/// Parse a version string using PEP 440 rules
pub fn parse_version(version: &str) -> Result<Version, CompatError> {
    Version::from_str(version.trim()).map_err(|e| CompatError::unparsable_version(version, e))
}

/// Compare two version strings by parsed precedence
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, CompatError> {
    Ok(parse_version(a)?.cmp(&parse_version(b)?))
}

/// Returns true if `candidate` is strictly newer than `pin`
pub fn is_newer(candidate: &str, pin: &str) -> Result<bool, CompatError> {
    Ok(compare_versions(candidate, pin)? == Ordering::Greater)
}

/// Sort version strings ascending, dropping the ones that cannot be parsed
pub fn sorted_versions<'a, I>(versions: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut parsed: Vec<(Version, &String)> = versions
        .into_iter()
        .filter_map(|raw| match parse_version(raw) {
            Ok(version) => Some((version, raw)),
            Err(e) => {
                warn!("excluding release from ordering: {}", e);
                None
            }
        })
        .collect();

    parsed.sort_by(|a, b| a.0.cmp(&b.0));
    parsed.into_iter().map(|(_, raw)| raw.clone()).collect()
}

/// Leading numeral of a runtime version ("3.8" -> "3")
pub fn major_component(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}
