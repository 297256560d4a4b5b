//! Support timeline: when each target runtime version first appeared

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Targets first supported by a single release
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Target versions whose support was added in this release
    pub added: Vec<String>,
    /// Upload time of the release's earliest artifact, if published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<DateTime<Utc>>,
}

/// Releases at which support for each target was first declared
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupportTimeline {
    /// First-supporting releases keyed by version, ascending
    pub entries: IndexMap<String, TimelineEntry>,
    /// Targets never found in the release history
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

impl SupportTimeline {
    /// Returns true if at least one target was resolved
    pub fn found(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Release that first supported `target`, if any
    pub fn first_release_for(&self, target: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.added.iter().any(|t| t == target))
            .map(|(version, _)| version.as_str())
    }
}
