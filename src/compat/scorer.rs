//! Compatibility scoring
//!
//! Combines three signals for one (release, target) pair:
//! - requires-python admits both the target and the legacy runtime
//! - classifiers list the target (or its major) and the legacy runtime
//! - build tags cover both the target and the legacy runtime
//!
//! Only releases with a declared, well-formed requires-python are scored;
//! classifiers and build tags corroborate but never qualify a release alone.

use super::build_tag::tags_cover;
use super::classifier::lists_version;
use super::specifier::SpecifierEvaluator;
use crate::domain::version::major_component;
use crate::domain::CompatibilityVerdict;

/// Legacy runtime version used for corroboration
pub const DEFAULT_LEGACY_VERSION: &str = "2.7";

/// Per-release inputs to the scorer
#[derive(Debug, Clone, Copy)]
pub struct ReleaseSignals<'a> {
    /// Declared requires-python, if any
    pub requires_python: Option<&'a str>,
    /// Runtime tokens extracted from classifiers
    pub runtime_tokens: &'a [String],
    /// Build tags of the release's artifacts
    pub build_tags: &'a [String],
}

/// Scores releases against target runtime versions
pub struct Scorer {
    legacy_version: String,
    specifiers: SpecifierEvaluator,
}

impl Scorer {
    /// Create a scorer corroborating against `legacy_version`
    pub fn new(legacy_version: impl Into<String>) -> Self {
        Self {
            legacy_version: legacy_version.into(),
            specifiers: SpecifierEvaluator::new(),
        }
    }

    pub fn legacy_version(&self) -> &str {
        &self.legacy_version
    }

    /// The shared requires-python evaluator
    pub fn specifiers(&self) -> &SpecifierEvaluator {
        &self.specifiers
    }

    /// Score one release for `target`
    pub fn score(&self, signals: &ReleaseSignals<'_>, target: &str) -> CompatibilityVerdict {
        let mut verdict = CompatibilityVerdict::new(target);
        if !self.specifiers.is_declared(signals.requires_python) {
            return verdict;
        }

        let legacy = self.legacy_version.as_str();
        let CompatibilityVerdict {
            score,
            requires_python_support,
            trove_versions_support,
            wheels_available,
            ..
        } = &mut verdict;

        let in_range = self
            .specifiers
            .runtime_in_range(signals.requires_python, target)
            && self
                .specifiers
                .runtime_in_range(signals.requires_python, legacy);
        CompatibilityVerdict::record(requires_python_support, score, in_range);

        if !signals.runtime_tokens.is_empty() {
            let tokens = signals.runtime_tokens;
            let listed = (lists_version(tokens, target)
                || lists_version(tokens, major_component(target)))
                && lists_version(tokens, legacy);
            CompatibilityVerdict::record(trove_versions_support, score, listed);
        }

        if let (Some(target_tag), Some(legacy_tag)) = (
            tags_cover(signals.build_tags, target),
            tags_cover(signals.build_tags, legacy),
        ) {
            CompatibilityVerdict::record(wheels_available, score, target_tag && legacy_tag);
        }

        verdict
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(DEFAULT_LEGACY_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_signals_confirm() {
        let tokens = strings(&["2.7", "3.8"]);
        let tags = strings(&["py2.py3"]);
        let signals = ReleaseSignals {
            requires_python: Some(">=2.7, !=3.0.*, <4"),
            runtime_tokens: &tokens,
            build_tags: &tags,
        };

        let verdict = Scorer::default().score(&signals, "3.8");
        assert_eq!(verdict.score, 3);
        assert_eq!(verdict.target, "3.8");
        assert_eq!(verdict.requires_python_support, Some(true));
        assert_eq!(verdict.trove_versions_support, Some(true));
        assert_eq!(verdict.wheels_available, Some(true));
        assert!(verdict.is_candidate());
    }

    #[test]
    fn test_range_excluding_legacy_loses_specifier_point() {
        let tokens = strings(&["2.7", "3.8"]);
        let tags = strings(&["py2.py3"]);
        let signals = ReleaseSignals {
            requires_python: Some(">=3.6,<4"),
            runtime_tokens: &tokens,
            build_tags: &tags,
        };

        let verdict = Scorer::default().score(&signals, "3.8");
        assert_eq!(verdict.score, 2);
        assert_eq!(verdict.requires_python_support, Some(false));
    }

    #[test]
    fn test_gate_closed_without_specifier() {
        let tokens = strings(&["2.7", "3.8"]);
        let tags = strings(&["py2.py3"]);
        let scorer = Scorer::default();

        for requires_python in [None, Some(""), Some("  "), Some(">>3.6")] {
            let signals = ReleaseSignals {
                requires_python,
                runtime_tokens: &tokens,
                build_tags: &tags,
            };
            let verdict = scorer.score(&signals, "3.8");
            assert_eq!(verdict.score, 0);
            assert_eq!(verdict.requires_python_support, None);
            assert_eq!(verdict.trove_versions_support, None);
            assert_eq!(verdict.wheels_available, None);
        }
    }

    #[test]
    fn test_major_classifier_counts_for_target() {
        let tokens = strings(&["2.7", "3"]);
        let signals = ReleaseSignals {
            requires_python: Some(">=3.6"),
            runtime_tokens: &tokens,
            build_tags: &[],
        };
        let verdict = Scorer::default().score(&signals, "3.7");
        assert_eq!(verdict.trove_versions_support, Some(true));
        assert_eq!(verdict.score, 1);
    }

    #[test]
    fn test_classifiers_require_legacy() {
        let tokens = strings(&["3.6", "3.7", "3.8"]);
        let signals = ReleaseSignals {
            requires_python: Some(">=3.6"),
            runtime_tokens: &tokens,
            build_tags: &[],
        };
        let verdict = Scorer::default().score(&signals, "3.8");
        assert_eq!(verdict.trove_versions_support, Some(false));
        assert_eq!(verdict.score, 0);
        assert!(!verdict.is_candidate());
    }

    #[test]
    fn test_missing_artifacts_are_unavailable_not_unsupported() {
        let signals = ReleaseSignals {
            requires_python: Some(">=2.7"),
            runtime_tokens: &[],
            build_tags: &[],
        };
        let verdict = Scorer::default().score(&signals, "3.8");
        assert_eq!(verdict.wheels_available, None);
        assert_eq!(verdict.trove_versions_support, None);
        assert_eq!(verdict.requires_python_support, Some(true));
        assert_eq!(verdict.score, 1);
    }

    #[test]
    fn test_split_wheels_cover_both_runtimes() {
        let tags = strings(&["cp27", "cp38", "source"]);
        let signals = ReleaseSignals {
            requires_python: Some(">=3.6"),
            runtime_tokens: &[],
            build_tags: &tags,
        };
        let verdict = Scorer::default().score(&signals, "3.8");
        assert_eq!(verdict.wheels_available, Some(true));

        let verdict = Scorer::default().score(&signals, "3.7");
        assert_eq!(verdict.wheels_available, Some(false));
    }

    #[test]
    fn test_custom_legacy_version() {
        let tokens = strings(&["3.5", "3.8"]);
        let signals = ReleaseSignals {
            requires_python: Some(">=3.5"),
            runtime_tokens: &tokens,
            build_tags: &[],
        };
        let scorer = Scorer::new("3.5");
        assert_eq!(scorer.legacy_version(), "3.5");
        let verdict = scorer.score(&signals, "3.8");
        assert_eq!(verdict.score, 2);
    }
}
