//! Release metadata cache
//!
//! Memoizes package-level and release-level registry reads for the lifetime
//! of a run. Entries are never invalidated. Each key owns a `OnceCell`, so a
//! key is read at most once even if several callers ask for it at the same
//! time; failed reads are memoized as well.

use super::client::JsonSource;
use super::pypi::{package_url, release_url, PackageMetadata, ReleaseMetadata};
use crate::error::RegistryError;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

type Slot<T> = Arc<OnceCell<Result<Arc<T>, RegistryError>>>;
type SlotMap<K, T> = Mutex<HashMap<K, Slot<T>>>;

/// Memoizing front of the registry
pub struct MetadataCache {
    source: Arc<dyn JsonSource>,
    index_url: String,
    packages: SlotMap<String, PackageMetadata>,
    releases: SlotMap<(String, String), ReleaseMetadata>,
}

impl MetadataCache {
    /// Create a cache reading from `source` under `index_url`
    pub fn new(source: Arc<dyn JsonSource>, index_url: impl Into<String>) -> Self {
        Self {
            source,
            index_url: index_url.into(),
            packages: Mutex::new(HashMap::new()),
            releases: Mutex::new(HashMap::new()),
        }
    }

    /// Package-level metadata for `name`
    pub async fn fetch_package(&self, name: &str) -> Result<Arc<PackageMetadata>, RegistryError> {
        let slot = slot_for(&self.packages, name.to_string());
        let outcome = slot.get_or_init(|| self.load_package(name)).await;
        outcome.clone()
    }

    /// Release-level metadata for `name` at `version`
    pub async fn fetch_release(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Arc<ReleaseMetadata>, RegistryError> {
        let slot = slot_for(&self.releases, (name.to_string(), version.to_string()));
        let outcome = slot.get_or_init(|| self.load_release(name, version)).await;
        outcome.clone()
    }

    async fn load_package(&self, name: &str) -> Result<Arc<PackageMetadata>, RegistryError> {
        let url = package_url(&self.index_url, name);
        let response = self.source.get_json(&url).await.inspect_err(|e| {
            warn!("registry read failed for {}: {}", name, e);
        })?;

        if !response.is_success() {
            let err = RegistryError::package_not_found(name, response.status);
            warn!("{}", err);
            return Err(err);
        }

        let metadata: PackageMetadata = serde_json::from_value(response.body)
            .map_err(|e| RegistryError::invalid_response(&url, e.to_string()))?;
        debug!(
            "fetched {} ({} releases)",
            metadata.info.name,
            metadata.releases.len()
        );
        Ok(Arc::new(metadata))
    }

    async fn load_release(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Arc<ReleaseMetadata>, RegistryError> {
        let url = release_url(&self.index_url, name, version);
        let response = self.source.get_json(&url).await.inspect_err(|e| {
            warn!("registry read failed for {} {}: {}", name, version, e);
        })?;

        if !response.is_success() {
            let err = RegistryError::release_not_found(name, version, response.status);
            warn!("{}", err);
            return Err(err);
        }

        let metadata = ReleaseMetadata::from_value(response.body)
            .map_err(|e| RegistryError::invalid_response(&url, e.to_string()))?;
        Ok(Arc::new(metadata))
    }
}

fn slot_for<K: Eq + Hash, T>(map: &SlotMap<K, T>, key: K) -> Slot<T> {
    let mut slots = map.lock().unwrap_or_else(PoisonError::into_inner);
    slots.entry(key).or_default().clone()
}
