//! Pinned requirement structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Constraint operator of a pinned requirement line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintOperator {
    /// Exact pin (`==`)
    Eq,
    /// Compatible release (`~=`)
    Compatible,
}

impl ConstraintOperator {
    /// Parse the operator as written in a requirements file
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==" => Some(ConstraintOperator::Eq),
            "~=" => Some(ConstraintOperator::Compatible),
            _ => None,
        }
    }

    /// The operator as written in a requirements file
    pub fn symbol(&self) -> &'static str {
        match self {
            ConstraintOperator::Eq => "==",
            ConstraintOperator::Compatible => "~=",
        }
    }
}

impl fmt::Display for ConstraintOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A dependency pinned in the caller's requirements list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Package name as written (extras stripped)
    pub name: String,
    /// Pin operator
    pub constraint_operator: ConstraintOperator,
    /// Locally pinned version
    pub version: String,
}

impl Requirement {
    /// Creates a new requirement
    pub fn new(
        name: impl Into<String>,
        constraint_operator: ConstraintOperator,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            constraint_operator,
            version: version.into(),
        }
    }

    /// Creates an exact (`==`) requirement
    pub fn pinned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name, ConstraintOperator::Eq, version)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, self.constraint_operator, self.version)
    }
}
