//! Checklist model
//!
//! Defines the inspection items tracked per unit:
//! - Task status with its three-state toggle cycle
//! - The closed set of checklist categories
//! - Tasks and their identifiers

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Unique task identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    /// Generate new task ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(format!("task-{}", Ulid::new()))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Inspection status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Checked and in order
    #[serde(rename = "OK")]
    Ok,
    /// Not yet checked
    #[default]
    #[serde(rename = "PENDENTE")]
    Pending,
    /// Checked and damaged or missing
    #[serde(rename = "NAO_OK")]
    Failed,
}

impl TaskStatus {
    /// Next status in the toggle cycle `Pending → Ok → Failed → Pending`
    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Pending => Self::Ok,
            Self::Ok => Self::Failed,
            Self::Failed => Self::Pending,
        }
    }

    /// Whether the task counts toward completion
    #[inline]
    #[must_use]
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// Stored name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Pending => "PENDENTE",
            Self::Failed => "NAO_OK",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checklist category
///
/// Ordering is lexicographic on the wire name so grouped reports come out
/// in the same order on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Main house
    #[serde(rename = "CASA SEDE")]
    CasaSede,
    /// Barbecue and kitchen area
    #[serde(rename = "ÁREA GOURMET")]
    AreaGourmet,
    /// Pool
    #[serde(rename = "PISCINA")]
    Piscina,
    /// General inspection
    #[default]
    #[serde(rename = "INSPECTION")]
    Inspection,
    /// Generated suggestion
    #[serde(rename = "AI_SUGGESTION")]
    AiSuggestion,
}

impl Category {
    /// Every category
    pub const ALL: [Category; 5] = [
        Self::CasaSede,
        Self::AreaGourmet,
        Self::Piscina,
        Self::Inspection,
        Self::AiSuggestion,
    ];

    /// Persisted name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CasaSede => "CASA SEDE",
            Self::AreaGourmet => "ÁREA GOURMET",
            Self::Piscina => "PISCINA",
            Self::Inspection => "INSPECTION",
            Self::AiSuggestion => "AI_SUGGESTION",
        }
    }

    /// Human-facing label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::CasaSede => "Casa Sede",
            Self::AreaGourmet => "Área Gourmet",
            Self::Piscina => "Piscina",
            Self::Inspection => "Geral",
            Self::AiSuggestion => "Sugestão AI",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::CasaSede => "casa-sede",
            Self::AreaGourmet => "area-gourmet",
            Self::Piscina => "piscina",
            Self::Inspection => "inspection",
            Self::AiSuggestion => "ai-suggestion",
        }
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Accepts the persisted name, the label, or a slug such as `area-gourmet`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.as_str() == needle
                    || c.label().eq_ignore_ascii_case(needle)
                    || c.slug().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// A single checklist entry attached to a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task ID
    pub id: TaskId,
    /// What to inspect
    pub title: String,
    /// Current inspection status
    pub status: TaskStatus,
    /// Category the task is grouped under
    pub category: Category,
    /// Staff member responsible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// Last change, milliseconds since epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Task {
    /// Create a pending task
    #[must_use]
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            status: TaskStatus::Pending,
            category,
            assigned_to: None,
            timestamp: None,
        }
    }

    /// With explicit status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Advance the status one step in the toggle cycle
    pub fn toggle(&mut self) -> TaskStatus {
        self.status = self.status.next();
        self.status
    }
}
