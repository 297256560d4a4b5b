//! Upgrade path resolution
//!
//! Three policies built on the scorer:
//! - `upgradeable`: newer releases qualifying for one target
//! - `upgradeable_for_any_target`: union over a target set
//! - `upgradeable_for_regression_check`: skip packages whose pin already
//!   supports the target, otherwise the any-target union

use super::package::{Package, Release, ReleaseSelection};
use crate::compat::{lists_version, Scorer};
use crate::domain::version::major_component;
use crate::domain::UpgradeReport;
use tracing::{debug, info};

/// Resolves upgrade candidates for a package
pub struct UpgradeResolver<'a> {
    scorer: &'a Scorer,
    targets: &'a [String],
}

impl<'a> UpgradeResolver<'a> {
    /// `targets` is the fixed set used by the any-target policies
    pub fn new(scorer: &'a Scorer, targets: &'a [String]) -> Self {
        Self { scorer, targets }
    }

    /// Releases newer than the pin that qualify for `target`
    pub async fn upgradeable(&self, package: &Package<'_>, target: &str) -> UpgradeReport {
        let releases = package
            .materialize_releases(ReleaseSelection::NewerThanPin)
            .await;
        self.score_releases(&releases, target)
    }

    /// Union of `upgradeable` over every configured target
    pub async fn upgradeable_for_any_target(&self, package: &Package<'_>) -> UpgradeReport {
        let releases = package
            .materialize_releases(ReleaseSelection::NewerThanPin)
            .await;

        let mut report = UpgradeReport::new();
        for target in self.targets {
            report.merge(self.score_releases(&releases, target));
        }
        report
    }

    /// Any-target upgrades, unless the pinned release already supports `target`
    pub async fn upgradeable_for_regression_check(
        &self,
        package: &Package<'_>,
        target: &str,
    ) -> UpgradeReport {
        if self.pinned_supports(package, target).await {
            info!(
                "{} {} already supports {}; no upgrade needed",
                package.name(),
                package.local_version(),
                target
            );
            return UpgradeReport::already_supported();
        }

        debug!(
            "{} {} does not support {}; checking newer releases",
            package.name(),
            package.local_version(),
            target
        );
        self.upgradeable_for_any_target(package).await
    }

    /// Whether the pinned release admits `target` by specifier or classifier
    pub async fn pinned_supports(&self, package: &Package<'_>, target: &str) -> bool {
        let Some(pinned) = package.pinned_release().await else {
            return false;
        };

        let tokens = pinned.runtime_tokens();
        self.scorer
            .specifiers()
            .runtime_in_range(pinned.requires_python(), target)
            || lists_version(tokens, target)
            || lists_version(tokens, major_component(target))
    }

    fn score_releases(&self, releases: &[Release], target: &str) -> UpgradeReport {
        let mut report = UpgradeReport::new();
        for release in releases {
            let verdict = self.scorer.score(&release.signals(), target);
            debug!(
                "{} scored {} for {}",
                release.version(),
                verdict.score,
                target
            );
            report.insert(release.version(), verdict);
        }
        report
    }
}
