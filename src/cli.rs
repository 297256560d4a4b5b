//! CLI argument parsing module for pyupcheck

use crate::compat::DEFAULT_LEGACY_VERSION;
use crate::config::ReportMode;
use crate::registry::PYPI_API_URL;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Checks whether newer releases of pinned requirements support a target runtime
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pyupcheck",
    version,
    about = "Find upgrades of pinned requirements that support a target Python version"
)]
#[command(group(
    ArgGroup::new("mode")
        .args(["upgrade_for_target", "upgrade_for_any_target", "added_support"])
        .multiple(false)
))]
pub struct CliArgs {
    /// Requirements file to check
    #[arg(long, value_name = "FILE")]
    pub req: PathBuf,

    // Report modes
    /// Only list packages whose pinned release lacks --target support but a newer one has it
    #[arg(long)]
    pub upgrade_for_target: bool,

    /// List newer releases that support any of --targets
    #[arg(long)]
    pub upgrade_for_any_target: bool,

    /// Show the first release that declared support for each of --targets
    #[arg(long)]
    pub added_support: bool,

    // Runtime versions
    /// Primary target Python version
    #[arg(long, value_name = "VER", default_value = "3.8")]
    pub target: String,

    /// Comma-separated target Python versions
    #[arg(
        long,
        value_name = "LIST",
        value_delimiter = ',',
        default_values = ["3.8", "3.7", "3.6"]
    )]
    pub targets: Vec<String>,

    /// Legacy Python version a release must still support to score
    #[arg(long, value_name = "VER", default_value = DEFAULT_LEGACY_VERSION)]
    pub legacy: String,

    // Registry options
    /// Registry JSON API base URL
    #[arg(long, value_name = "URL", default_value = PYPI_API_URL)]
    pub index_url: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    // Output options
    /// Append the plain-text summary to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// The selected report mode
    pub fn report_mode(&self) -> ReportMode {
        if self.upgrade_for_target {
            ReportMode::UpgradeForTarget
        } else if self.upgrade_for_any_target {
            ReportMode::UpgradeForAnyTarget
        } else if self.added_support {
            ReportMode::AddedSupport
        } else {
            ReportMode::Upgradeable
        }
    }
}
