//! Support timeline reconstruction
//!
//! Walks the full release history in ascending order and records the
//! first release whose classifiers list each target. The walk stops as
//! soon as every target is resolved.

use super::package::{Package, ReleaseSelection};
use crate::compat::lists_version;
use crate::domain::{SupportTimeline, TimelineEntry};
use tracing::debug;

/// Reconstruct when support for each of `targets` was first declared
pub async fn support_timeline(package: &Package<'_>, targets: &[String]) -> SupportTimeline {
    let mut pending: Vec<String> = Vec::new();
    for target in targets {
        if !pending.contains(target) {
            pending.push(target.clone());
        }
    }

    let mut timeline = SupportTimeline::default();
    for version in package.release_versions(ReleaseSelection::All) {
        if pending.is_empty() {
            break;
        }

        let Some(release) = package.release(&version).await else {
            continue;
        };

        let (added, still_pending): (Vec<String>, Vec<String>) = pending
            .into_iter()
            .partition(|target| lists_version(release.runtime_tokens(), target));
        pending = still_pending;

        if !added.is_empty() {
            debug!("{} {} adds support for {:?}", package.name(), version, added);
            let released_at = package.released_at(&version);
            timeline
                .entries
                .insert(version, TimelineEntry { added, released_at });
        }
    }

    timeline.unresolved = pending;
    timeline
}
