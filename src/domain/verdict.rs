//! Compatibility verdicts and upgrade reports

use super::version::compare_versions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of scoring one release against one target runtime version
///
/// A signal that was never consulted, or had nothing to say, stays `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompatibilityVerdict {
    /// Target runtime version this verdict was computed for
    pub target: String,
    /// Number of signals that confirmed support
    pub score: u32,
    /// Declared requires-python admits both target and legacy versions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_python_support: Option<bool>,
    /// Classifiers list both target (or its major) and legacy versions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trove_versions_support: Option<bool>,
    /// Build tags cover both target and legacy versions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheels_available: Option<bool>,
}

impl CompatibilityVerdict {
    /// Creates an empty verdict for a target
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Whether this release is a usable upgrade candidate
    pub fn is_candidate(&self) -> bool {
        self.score >= 1
    }

    /// Records one signal and bumps the score when it confirms support
    pub(crate) fn record(slot: &mut Option<bool>, score: &mut u32, supported: bool) {
        *slot = Some(supported);
        if supported {
            *score += 1;
        }
    }
}

/// Releases newer than the local pin that qualify as upgrade candidates
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpgradeReport {
    /// Qualifying releases keyed by version, in ascending version order
    pub candidates: IndexMap<String, CompatibilityVerdict>,
    /// The pinned release already supports the target; nothing to upgrade
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pinned_already_supported: bool,
}

impl UpgradeReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for a pin that already supports the requested target
    pub fn already_supported() -> Self {
        Self {
            candidates: IndexMap::new(),
            pinned_already_supported: true,
        }
    }

    /// Returns true if any release qualified
    pub fn found(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Adds a candidate; returns false if the verdict does not qualify
    pub fn insert(&mut self, version: impl Into<String>, verdict: CompatibilityVerdict) -> bool {
        if !verdict.is_candidate() {
            return false;
        }
        self.candidates.insert(version.into(), verdict);
        true
    }

    /// Union with another report
    ///
    /// A version present in both keeps the higher-scoring verdict; on a tie
    /// the verdict already held wins.
    pub fn merge(&mut self, other: UpgradeReport) {
        for (version, verdict) in other.candidates {
            match self.candidates.get(&version) {
                Some(existing) if existing.score >= verdict.score => {}
                _ => {
                    self.candidates.insert(version, verdict);
                }
            }
        }
        self.candidates
            .sort_by(|a, _, b, _| compare_versions(a, b).unwrap_or_else(|_| a.cmp(b)));
    }

    /// The newest qualifying version (candidates are kept in ascending order)
    pub fn newest(&self) -> Option<&str> {
        self.candidates.keys().last().map(String::as_str)
    }
}
