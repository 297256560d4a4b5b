//! Requirements file parsing
//!
//! Turns a pip requirements file into the pinned `Requirement` list the
//! checker consumes.

mod requirements;

pub use requirements::{parse_requirement_line, parse_requirements, read_requirements};
