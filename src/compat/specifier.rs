//! Version specifier evaluation for requires-python
//!
//! Absent or blank specifiers never admit anything. Results are memoized per
//! (specifier, runtime version) pair for the lifetime of the evaluator.

use crate::domain::version::parse_version;
use crate::error::CompatError;
use pep508_rs::pep440_rs::VersionSpecifiers;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Parse a comma-separated specifier set such as `>=3.6,<4`
pub fn parse_specifier(range: &str) -> Result<VersionSpecifiers, CompatError> {
    VersionSpecifiers::from_str(range.trim())
        .map_err(|e| CompatError::malformed_specifier(range, e))
}

/// Memoizing requires-python evaluator
#[derive(Default)]
pub struct SpecifierEvaluator {
    parsed: Mutex<HashMap<String, Option<Arc<VersionSpecifiers>>>>,
    verdicts: Mutex<HashMap<(String, String), bool>>,
}

impl SpecifierEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `range` is present, non-blank and well formed
    ///
    /// A malformed specifier is logged once and then treated like an absent one.
    pub fn is_declared(&self, range: Option<&str>) -> bool {
        match range.map(str::trim) {
            Some(range) if !range.is_empty() => self.specifiers(range).is_some(),
            _ => false,
        }
    }

    /// Whether runtime `version` satisfies every clause of `range`
    pub fn runtime_in_range(&self, range: Option<&str>, version: &str) -> bool {
        let Some(range) = range.map(str::trim).filter(|r| !r.is_empty()) else {
            return false;
        };

        let key = (range.to_string(), version.to_string());
        if let Some(hit) = self.lock_verdicts().get(&key) {
            return *hit;
        }

        let contained = match (self.specifiers(range), parse_version(version)) {
            (Some(specifiers), Ok(version)) => specifiers.contains(&version),
            (_, Err(e)) => {
                warn!("{}", e);
                false
            }
            (None, _) => false,
        };

        self.lock_verdicts().insert(key, contained);
        contained
    }

    fn specifiers(&self, range: &str) -> Option<Arc<VersionSpecifiers>> {
        let mut parsed = self.parsed.lock().unwrap_or_else(PoisonError::into_inner);
        parsed
            .entry(range.to_string())
            .or_insert_with(|| match parse_specifier(range) {
                Ok(specifiers) => Some(Arc::new(specifiers)),
                Err(e) => {
                    warn!("ignoring requires-python: {}", e);
                    None
                }
            })
            .clone()
    }

    fn lock_verdicts(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), bool>> {
        self.verdicts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn memoized(&self) -> usize {
        self.lock_verdicts().len()
    }
}
