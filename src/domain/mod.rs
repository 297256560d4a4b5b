//! Core domain models for pyupcheck
//!
//! This module contains the fundamental types used throughout the application:
//! - Pinned requirements read from a requirements file
//! - PEP 440 version ordering helpers
//! - Compatibility verdicts and upgrade reports
//! - Support timelines

mod requirement;
mod timeline;
mod verdict;
pub mod version;

pub use requirement::{ConstraintOperator, Requirement};
pub use timeline::{SupportTimeline, TimelineEntry};
pub use verdict::{CompatibilityVerdict, UpgradeReport};
