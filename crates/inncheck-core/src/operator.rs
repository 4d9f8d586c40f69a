//! Logged-in operator

use crate::error::CoreError;
use crate::unit::non_empty;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the operator is allowed to manage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatorRole {
    /// Units, templates and inspections
    Admin,
    /// Check-in and check-out desk
    Reception,
}

impl fmt::Display for OperatorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "ADMIN",
            Self::Reception => "RECEPTION",
        })
    }
}

impl FromStr for OperatorRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "reception" | "recepcao" | "recepção" => Ok(Self::Reception),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

/// Operator session persisted between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Display name
    pub name: String,
    /// Role
    pub role: OperatorRole,
}

impl Operator {
    /// Start a session
    ///
    /// # Errors
    /// `CoreError::EmptyField` if the name is blank.
    pub fn new(name: &str, role: OperatorRole) -> Result<Self, CoreError> {
        Ok(Self {
            name: non_empty(name, "operator name")?,
            role,
        })
    }
}
