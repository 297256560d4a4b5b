//! Application error types using thiserror
//!
//! Error hierarchy:
//! - RegistryError: Issues with package registry communication
//! - CompatError: Malformed metadata found while scoring releases
//! - RequirementError: Issues reading the requirements file
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Compatibility metadata errors
    #[error(transparent)]
    Compat(#[from] CompatError),

    /// Requirements file errors
    #[error(transparent)]
    Requirement(#[from] RequirementError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to package registry communication
///
/// `Clone` so a memoized failure can be handed out again without a new read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Registry answered with a non-success status
    #[error("{} not found in registry (HTTP {status})", describe(package, version.as_deref()))]
    NotFound {
        package: String,
        version: Option<String>,
        status: u16,
    },

    /// Network request failed before a status was received
    #[error("failed to fetch {url}: {message}")]
    Network { url: String, message: String },

    /// Success status but the payload could not be decoded
    #[error("invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

fn describe(package: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("release '{}' of package '{}'", version, package),
        None => format!("package '{}'", package),
    }
}

/// Errors raised while interpreting release metadata
///
/// These never abort a batch: the scorer treats them as an unavailable signal
/// and the resolver drops the offending release.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompatError {
    /// A requires-python string that is not a valid specifier set
    #[error("malformed version specifier '{spec}': {message}")]
    MalformedSpecifier { spec: String, message: String },

    /// A version string that cannot be ordered
    #[error("unparsable version '{version}': {message}")]
    UnparsableVersion { version: String, message: String },
}

/// Errors related to the requirements file
#[derive(Error, Debug)]
pub enum RequirementError {
    /// Failed to read the requirements file
    #[error("failed to read requirements file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A runtime version that is not a valid PEP 440 version
    #[error("invalid runtime version '{value}' for {option}")]
    InvalidRuntimeVersion { option: String, value: String },

    /// The target set is empty
    #[error("at least one target version is required")]
    EmptyTargets,
}

impl RegistryError {
    /// Creates a NotFound error for a package-level lookup
    pub fn package_not_found(package: impl Into<String>, status: u16) -> Self {
        RegistryError::NotFound {
            package: package.into(),
            version: None,
            status,
        }
    }

    /// Creates a NotFound error for a release-level lookup
    pub fn release_not_found(
        package: impl Into<String>,
        version: impl Into<String>,
        status: u16,
    ) -> Self {
        RegistryError::NotFound {
            package: package.into(),
            version: Some(version.into()),
            status,
        }
    }

    /// Creates a new Network error
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns true if the registry reported the entry as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }
}

impl CompatError {
    /// Creates a new MalformedSpecifier error
    pub fn malformed_specifier(spec: impl Into<String>, message: impl ToString) -> Self {
        CompatError::MalformedSpecifier {
            spec: spec.into(),
            message: message.to_string(),
        }
    }

    /// Creates a new UnparsableVersion error
    pub fn unparsable_version(version: impl Into<String>, message: impl ToString) -> Self {
        CompatError::UnparsableVersion {
            version: version.into(),
            message: message.to_string(),
        }
    }
}

impl RequirementError {
    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RequirementError::Read {
            path: path.into(),
            source,
        }
    }
}
