//! pyupcheck - Python requirement upgrade checker library
//!
//! This library decides whether newer releases of pinned requirements
//! support a target Python version, using only registry metadata:
//! - requires-python specifiers
//! - Trove classifiers
//! - Build tags of distributed artifacts

pub mod cli;
pub mod compat;
pub mod config;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod registry;
pub mod resolver;
