//! Error types for InnCheck Core
//!
//! Provides error handling for:
//! - Identifier (CPF) validation failures
//! - Unit and template lookups
//! - Checklist mutations with invalid input
//! - Check-in/check-out attempted in the wrong unit state

use crate::unit::UnitStatus;

/// Guest identity validation errors
///
/// Always recoverable: surfaced as inline feedback and blocks progression
/// of an intake, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Normalized identifier does not have exactly 11 digits
    #[error("CPF incompleto: expected 11 digits, found {found}")]
    WrongLength { found: usize },

    /// All 11 digits are the same
    #[error("CPF inválido: repeated digits")]
    RepeatedDigits,

    /// A computed check digit does not match the supplied one
    #[error("CPF inválido: check digit {position} mismatch (expected {expected}, found {found})")]
    ChecksumMismatch {
        /// Index of the failing check digit (9 or 10)
        position: usize,
        /// Computed digit
        expected: u8,
        /// Supplied digit
        found: u8,
    },

    /// Guest name is empty or whitespace
    #[error("guest name is required")]
    EmptyName,
}

/// Main InnCheck Core error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Identity validation failed
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No unit with the given id or number
    #[error("unit not found: {0}")]
    UnitNotFound(String),

    /// No task with the given id in the unit
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// No template with the given id or name
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Template item index out of range
    #[error("template item {index} out of range (template has {len} items)")]
    TemplateItemOutOfRange { index: usize, len: usize },

    /// Required text field is empty
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Check-in attempted on a unit that is not available
    #[error("unit {number} is not available (status: {status})")]
    UnitNotAvailable { number: String, status: UnitStatus },

    /// Operation requires a guest but the unit has none
    #[error("unit {0} has no current guest")]
    NoGuest(String),

    /// Image payload could not be decoded
    #[error("invalid image payload: {0}")]
    InvalidImage(String),

    /// Unknown category name
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Unknown operator role
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

impl CoreError {
    /// Check if the error comes from user input that can be corrected and resubmitted
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::EmptyField(_)
                | Self::UnknownCategory(_)
                | Self::UnknownRole(_)
                | Self::TemplateItemOutOfRange { .. }
        )
    }

    /// Check if the error is a failed lookup
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnitNotFound(_) | Self::TaskNotFound(_) | Self::TemplateNotFound(_)
        )
    }
}
