//! Registry access for package metadata
//!
//! This module provides:
//! - `JsonSource`, the read capability over registry JSON endpoints
//! - A reqwest `HttpClient` implementing it
//! - PyPI JSON API payload types and URL builders
//! - `MetadataCache`, the run-scoped memoizing front of the registry

mod cache;
mod client;
mod pypi;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::MetadataCache;
pub use client::{HttpClient, JsonResponse, JsonSource, DEFAULT_TIMEOUT};
pub use pypi::{
    package_url, release_url, ArtifactDescriptor, PackageInfo, PackageMetadata, ReleaseMetadata,
    PYPI_API_URL,
};
