//! Run configuration derived from CLI arguments

use crate::cli::CliArgs;
use crate::domain::version::parse_version;
use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// What the run reports for each requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// Newer releases that qualify for the primary target
    #[default]
    Upgradeable,
    /// Upgrades only for packages whose pin lacks the primary target
    UpgradeForTarget,
    /// Newer releases that qualify for any configured target
    UpgradeForAnyTarget,
    /// First release declaring each configured target
    AddedSupport,
}

impl ReportMode {
    /// Heading of the final summary
    pub fn summary_heading(&self) -> &'static str {
        match self {
            ReportMode::AddedSupport => "Packages with Added Support",
            _ => "Upgradeable Packages",
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportMode::Upgradeable => "upgradeable",
            ReportMode::UpgradeForTarget => "upgrade-for-target",
            ReportMode::UpgradeForAnyTarget => "upgrade-for-any-target",
            ReportMode::AddedSupport => "added-support",
        };
        write!(f, "{}", name)
    }
}

/// Validated configuration for a check run
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Requirements file to check
    pub requirements: PathBuf,
    pub mode: ReportMode,
    /// Primary target runtime version
    pub target: String,
    /// Target set for the any-target policy and the timeline, deduplicated
    pub targets: Vec<String>,
    /// Legacy runtime version used for corroboration
    pub legacy: String,
    /// Registry base URL
    pub index_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// File the plain-text summary is appended to
    pub output: Option<PathBuf>,
    /// Suppress progress display
    pub quiet: bool,
}

impl CheckConfig {
    /// Build and validate a configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        let target = runtime_version("--target", &args.target)?;
        let legacy = runtime_version("--legacy", &args.legacy)?;

        let mut targets: Vec<String> = Vec::new();
        for raw in &args.targets {
            if raw.trim().is_empty() {
                continue;
            }
            let version = runtime_version("--targets", raw)?;
            if !targets.contains(&version) {
                targets.push(version);
            }
        }
        if targets.is_empty() {
            return Err(ConfigError::EmptyTargets);
        }

        Ok(Self {
            requirements: args.req.clone(),
            mode: args.report_mode(),
            target,
            targets,
            legacy,
            index_url: args.index_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(args.timeout),
            output: args.output.clone(),
            quiet: args.quiet || args.json,
        })
    }
}

fn runtime_version(option: &str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() || parse_version(value).is_err() {
        return Err(ConfigError::InvalidRuntimeVersion {
            option: option.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}
