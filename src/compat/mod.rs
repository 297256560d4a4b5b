//! Runtime compatibility signals and scoring
//!
//! This module provides:
//! - requires-python specifier evaluation
//! - Trove classifier parsing
//! - Build tag inspection
//! - The scorer combining the three into a verdict

mod build_tag;
mod classifier;
mod scorer;
mod specifier;

pub use build_tag::{artifact_tags_for_release, tag_covers, tags_cover};
pub use classifier::{extract_runtime_versions, lists_version};
pub use scorer::{ReleaseSignals, Scorer, DEFAULT_LEGACY_VERSION};
pub use specifier::{parse_specifier, SpecifierEvaluator};
