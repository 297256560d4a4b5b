//! Package and release entities backed by the metadata cache

use crate::compat::{artifact_tags_for_release, extract_runtime_versions, ReleaseSignals};
use crate::domain::version::{is_newer, parse_version, sorted_versions};
use crate::error::{CompatError, RegistryError};
use crate::registry::{MetadataCache, PackageMetadata, ReleaseMetadata};
use chrono::{DateTime, Utc};
use pep508_rs::pep440_rs::Version;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::warn;

/// Which releases `Package::materialize_releases` fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseSelection {
    /// Releases strictly newer than the local pin
    NewerThanPin,
    /// The whole release history
    All,
}

/// One published version of a package
///
/// Ordering, equality and hashing follow the parsed PEP 440 version.
#[derive(Debug, Clone)]
pub struct Release {
    version: String,
    parsed: Version,
    metadata: Arc<ReleaseMetadata>,
    runtime_tokens: Vec<String>,
    build_tags: Vec<String>,
}

impl Release {
    /// Creates a release; fails if `version` cannot be ordered
    pub fn new(
        version: impl Into<String>,
        metadata: Arc<ReleaseMetadata>,
        build_tags: Vec<String>,
    ) -> Result<Self, CompatError> {
        let version = version.into();
        let parsed = parse_version(&version)?;
        let runtime_tokens = extract_runtime_versions(&metadata.info.classifiers);
        Ok(Self {
            version,
            parsed,
            metadata,
            runtime_tokens,
            build_tags,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Declared requires-python, `None` when absent or blank
    pub fn requires_python(&self) -> Option<&str> {
        self.metadata.requires_python()
    }

    /// Runtime tokens from this release's classifiers
    pub fn runtime_tokens(&self) -> &[String] {
        &self.runtime_tokens
    }

    /// Build tags of this release's artifacts
    pub fn build_tags(&self) -> &[String] {
        &self.build_tags
    }

    /// Raw registry metadata
    pub fn metadata(&self) -> &ReleaseMetadata {
        &self.metadata
    }

    /// Scorer inputs for this release
    pub fn signals(&self) -> ReleaseSignals<'_> {
        ReleaseSignals {
            requires_python: self.requires_python(),
            runtime_tokens: &self.runtime_tokens,
            build_tags: &self.build_tags,
        }
    }
}

impl PartialEq for Release {
    fn eq(&self, other: &Self) -> bool {
        self.parsed == other.parsed
    }
}

impl Eq for Release {}

impl Hash for Release {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parsed.hash(state);
    }
}

impl PartialOrd for Release {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Release {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed.cmp(&other.parsed)
    }
}

/// A registry entry together with the caller's local pin
pub struct Package<'a> {
    cache: &'a MetadataCache,
    metadata: Arc<PackageMetadata>,
    local_version: String,
}

impl<'a> Package<'a> {
    /// Fetch package metadata for `name` pinned at `local_version`
    pub async fn load(
        cache: &'a MetadataCache,
        name: &str,
        local_version: impl Into<String>,
    ) -> Result<Package<'a>, RegistryError> {
        let metadata = cache.fetch_package(name).await?;
        Ok(Self {
            cache,
            metadata,
            local_version: local_version.into(),
        })
    }

    /// Canonical name as published
    pub fn name(&self) -> &str {
        &self.metadata.info.name
    }

    /// Latest version on the registry
    pub fn current_version(&self) -> &str {
        &self.metadata.info.version
    }

    /// Version pinned by the caller
    pub fn local_version(&self) -> &str {
        &self.local_version
    }

    /// Classifiers of the latest version
    pub fn classifiers(&self) -> &[String] {
        &self.metadata.info.classifiers
    }

    /// Declared requires-python of the latest version
    pub fn requires_python(&self) -> Option<&str> {
        self.metadata
            .info
            .requires_python
            .as_deref()
            .map(str::trim)
            .filter(|spec| !spec.is_empty())
    }

    /// Runtime tokens from the latest version's classifiers
    pub fn runtime_tokens(&self) -> Vec<String> {
        extract_runtime_versions(self.classifiers())
    }

    /// Build tags of every artifact attached to `version`
    pub fn artifact_tags(&self, version: &str) -> Vec<String> {
        artifact_tags_for_release(&self.metadata, version)
    }

    /// Earliest artifact upload time of `version`
    pub fn released_at(&self, version: &str) -> Option<DateTime<Utc>> {
        self.metadata.released_at(version)
    }

    /// Whether the pin already is the latest published version
    pub fn is_pinned_to_latest(&self) -> bool {
        match (
            parse_version(&self.local_version),
            parse_version(self.current_version()),
        ) {
            (Ok(local), Ok(current)) => local == current,
            _ => self.local_version == self.current_version(),
        }
    }

    /// Release versions under `selection`, ascending
    ///
    /// Unparsable versions are dropped. If the pin itself cannot be parsed,
    /// nothing counts as newer.
    pub fn release_versions(&self, selection: ReleaseSelection) -> Vec<String> {
        let sorted = sorted_versions(self.metadata.releases.keys());
        match selection {
            ReleaseSelection::All => sorted,
            ReleaseSelection::NewerThanPin => {
                if let Err(e) = parse_version(&self.local_version) {
                    warn!("{}: cannot order releases against the pin: {}", self.name(), e);
                    return Vec::new();
                }
                sorted
                    .into_iter()
                    .filter(|v| is_newer(v, &self.local_version).unwrap_or(false))
                    .collect()
            }
        }
    }

    /// Fetch a single release
    pub async fn release(&self, version: &str) -> Option<Release> {
        let metadata = match self.cache.fetch_release(self.name(), version).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("skipping {} {}: {}", self.name(), version, e);
                return None;
            }
        };

        Release::new(version, metadata, self.artifact_tags(version))
            .inspect_err(|e| warn!("skipping {} {}: {}", self.name(), version, e))
            .ok()
    }

    /// The release matching the local pin
    pub async fn pinned_release(&self) -> Option<Release> {
        self.release(&self.local_version).await
    }

    /// Fetch every release under `selection`, ascending
    ///
    /// Releases the registry cannot serve are skipped.
    pub async fn materialize_releases(&self, selection: ReleaseSelection) -> Vec<Release> {
        let mut releases = Vec::new();
        for version in self.release_versions(selection) {
            if let Some(release) = self.release(&version).await {
                releases.push(release);
            }
        }
        releases
    }
}
