//! Check orchestrator coordinating the per-requirement workflow
//!
//! This module provides:
//! - Workflow coordination: load package → skip if latest → dispatch on report mode
//! - Sequential processing, one requirement fully resolved before the next
//! - Error handling with partial continuation

use crate::compat::Scorer;
use crate::config::{CheckConfig, ReportMode};
use crate::domain::{Requirement, SupportTimeline, UpgradeReport};
use crate::error::RegistryError;
use crate::progress::CheckProgress;
use crate::registry::{HttpClient, JsonSource, MetadataCache};
use crate::resolver::{support_timeline, Package, UpgradeResolver};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Orchestrator for coordinating the check workflow
pub struct Orchestrator {
    config: CheckConfig,
    cache: MetadataCache,
    scorer: Scorer,
}

/// Latest-release facts shown in verbose output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageOverview {
    /// Latest version on the registry
    pub latest_version: String,
    /// Build tags of the latest release's artifacts
    pub build_tags: Vec<String>,
    /// Runtime tokens from the latest release's classifiers
    pub runtime_tokens: Vec<String>,
    /// Whether the latest release's requires-python admits the primary target
    pub target_in_range: bool,
}

/// What a requirement resolved to
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The pin already is the latest release
    AlreadyLatest,
    /// Upgrade candidates under one of the upgrade policies
    Upgrades(UpgradeReport),
    /// Support timeline in added-support mode
    Timeline(SupportTimeline),
}

impl Outcome {
    /// Whether this outcome belongs in the final summary
    pub fn qualifies(&self) -> bool {
        match self {
            Outcome::AlreadyLatest => false,
            Outcome::Upgrades(report) => report.found(),
            Outcome::Timeline(timeline) => timeline.found(),
        }
    }
}

/// Result for one requirement
#[derive(Debug, Clone)]
pub struct PackageOutcome {
    pub requirement: Requirement,
    pub overview: PackageOverview,
    pub outcome: Outcome,
}

/// Result of running the orchestrator
pub struct CheckResult {
    pub mode: ReportMode,
    /// Primary target runtime version
    pub target: String,
    /// Target set used by the any-target policy and the timeline
    pub targets: Vec<String>,
    /// Outcomes in requirements-file order
    pub outcomes: Vec<PackageOutcome>,
    /// Errors encountered during processing
    pub errors: Vec<OrchestratorError>,
}

impl CheckResult {
    /// Outcomes that belong in the final summary
    pub fn qualifying(&self) -> impl Iterator<Item = &PackageOutcome> {
        self.outcomes.iter().filter(|o| o.outcome.qualifies())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Errors that can occur during orchestration
#[derive(Debug)]
pub enum OrchestratorError {
    /// Failed to create HTTP client
    HttpClientError(String),
    /// Failed to load a requirement's package from the registry
    RegistryError {
        package: String,
        source: RegistryError,
    },
}

impl std::fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorError::HttpClientError(msg) => write!(f, "HTTP client error: {}", msg),
            OrchestratorError::RegistryError { package, source } => {
                write!(f, "Skipping {}: {}", package, source)
            }
        }
    }
}

impl std::error::Error for OrchestratorError {}

impl Orchestrator {
    /// Create an orchestrator talking to the configured registry
    pub fn new(config: CheckConfig) -> Result<Self, OrchestratorError> {
        let client = HttpClient::with_timeout(config.timeout)
            .map_err(|e| OrchestratorError::HttpClientError(e.to_string()))?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create an orchestrator with a custom JSON source (for testing)
    pub fn with_source(config: CheckConfig, source: Arc<dyn JsonSource>) -> Self {
        let cache = MetadataCache::new(source, config.index_url.clone());
        let scorer = Scorer::new(config.legacy.clone());
        Self {
            config,
            cache,
            scorer,
        }
    }

    /// Run the check workflow
    pub async fn run(&self, requirements: &[Requirement]) -> CheckResult {
        self.run_with_progress(requirements, !self.config.quiet)
            .await
    }

    /// Run the check workflow with optional progress display
    pub async fn run_with_progress(
        &self,
        requirements: &[Requirement],
        show_progress: bool,
    ) -> CheckResult {
        let mut progress = CheckProgress::new(requirements.len(), show_progress);
        let mut outcomes = Vec::new();
        let mut errors = Vec::new();

        for requirement in requirements {
            progress.checking(&requirement.name);

            let package =
                match Package::load(&self.cache, &requirement.name, &requirement.version).await {
                    Ok(package) => package,
                    Err(e) => {
                        warn!("skipping {}: {}", requirement.name, e);
                        errors.push(OrchestratorError::RegistryError {
                            package: requirement.name.clone(),
                            source: e,
                        });
                        progress.skipped();
                        continue;
                    }
                };

            let overview = self.overview(&package);
            let outcome = if package.is_pinned_to_latest() {
                debug!("{} {} is already the latest", package.name(), requirement.version);
                Outcome::AlreadyLatest
            } else {
                self.evaluate(&package).await
            };

            outcomes.push(PackageOutcome {
                requirement: requirement.clone(),
                overview,
                outcome,
            });
            progress.resolved();
        }
        debug!(
            "checked {} requirements, {} skipped",
            requirements.len(),
            progress.skipped_count()
        );
        progress.finish();

        CheckResult {
            mode: self.config.mode,
            target: self.config.target.clone(),
            targets: self.config.targets.clone(),
            outcomes,
            errors,
        }
    }

    /// Dispatch to the resolver entry point for the configured mode
    async fn evaluate(&self, package: &Package<'_>) -> Outcome {
        let resolver = UpgradeResolver::new(&self.scorer, &self.config.targets);
        let target = self.config.target.as_str();
        match self.config.mode {
            ReportMode::Upgradeable => {
                Outcome::Upgrades(resolver.upgradeable(package, target).await)
            }
            ReportMode::UpgradeForTarget => Outcome::Upgrades(
                resolver
                    .upgradeable_for_regression_check(package, target)
                    .await,
            ),
            ReportMode::UpgradeForAnyTarget => {
                Outcome::Upgrades(resolver.upgradeable_for_any_target(package).await)
            }
            ReportMode::AddedSupport => {
                Outcome::Timeline(support_timeline(package, &self.config.targets).await)
            }
        }
    }

    fn overview(&self, package: &Package<'_>) -> PackageOverview {
        let latest = package.current_version();
        PackageOverview {
            latest_version: latest.to_string(),
            build_tags: package.artifact_tags(latest),
            runtime_tokens: package.runtime_tokens(),
            target_in_range: self
                .scorer
                .specifiers()
                .runtime_in_range(package.requires_python(), &self.config.target),
        }
    }
}
