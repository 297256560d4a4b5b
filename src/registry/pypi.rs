//! PyPI JSON API payloads
//!
//! Endpoints:
//! - Package: {index}/{package}/json
//! - Release: {index}/{package}/{version}/json

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// PyPI API base URL
pub const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// Build the package-level URL
pub fn package_url(index: &str, package: &str) -> String {
    format!("{}/{}/json", index.trim_end_matches('/'), package)
}

/// Build the release-level URL
pub fn release_url(index: &str, package: &str, version: &str) -> String {
    format!(
        "{}/{}/{}/json",
        index.trim_end_matches('/'),
        package,
        version
    )
}

/// `info` block shared by package and release payloads
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageInfo {
    /// Canonical project name
    pub name: String,
    /// Version this payload describes (latest for package payloads)
    pub version: String,
    /// Trove classifiers
    #[serde(default)]
    pub classifiers: Vec<String>,
    /// Declared requires-python specifier
    #[serde(default)]
    pub requires_python: Option<String>,
}

/// One distributed file of a release
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArtifactDescriptor {
    /// Build tag, e.g. "cp38", "py2.py3", "source"
    #[serde(default)]
    pub python_version: String,
    #[serde(default)]
    pub upload_time_iso_8601: Option<DateTime<Utc>>,
}

/// Package-level metadata
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageMetadata {
    pub info: PackageInfo,
    /// Artifacts keyed by release version
    #[serde(default)]
    pub releases: HashMap<String, Vec<ArtifactDescriptor>>,
}

impl PackageMetadata {
    /// Build tags of every artifact attached to `version`
    pub fn artifact_tags(&self, version: &str) -> Vec<String> {
        self.releases
            .get(version)
            .map(|files| files.iter().map(|f| f.python_version.clone()).collect())
            .unwrap_or_default()
    }

    /// Earliest upload time across the artifacts of `version`
    pub fn released_at(&self, version: &str) -> Option<DateTime<Utc>> {
        self.releases
            .get(version)?
            .iter()
            .filter_map(|f| f.upload_time_iso_8601)
            .min()
    }
}

/// Release-level metadata, with the raw payload kept alongside
///
/// Artifacts are read from the package-level `releases` map, so the
/// release payload's `urls` list is not decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseMetadata {
    pub info: PackageInfo,
    /// Raw registry payload
    pub raw: Value,
}

#[derive(Deserialize)]
struct ReleasePayload {
    info: PackageInfo,
}

impl ReleaseMetadata {
    /// Decode a release payload, keeping the raw JSON
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let payload = ReleasePayload::deserialize(&raw)?;
        Ok(Self {
            info: payload.info,
            raw,
        })
    }

    /// Declared requires-python, `None` when absent or blank
    pub fn requires_python(&self) -> Option<&str> {
        self.info
            .requires_python
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
