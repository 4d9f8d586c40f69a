//! CPF identifier validation
//!
//! A CPF is the Brazilian 11-digit taxpayer number whose last two digits
//! are weighted mod-11 checksums of the preceding ones:
//! - Input is normalized by stripping every non-digit character
//! - Exactly 11 digits are required
//! - Repdigits (`11111111111`, ...) are rejected even though their
//!   checksums happen to match
//!
//! [`validate`] is the pure predicate; [`feedback`] layers the incremental
//! typing feedback on top of it.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a CPF
pub const CPF_LEN: usize = 11;

/// A validated CPF, stored as its 11 normalized digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Parse and validate an identifier, ignoring punctuation
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] found.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits = normalize(input);
        check(&digits)?;
        Ok(Self(digits))
    }

    /// The 11 digits without punctuation
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form `000.000.000-00`
    #[must_use]
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Cpf {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(value: Cpf) -> Self {
        value.0
    }
}

/// Strip every non-digit character
#[must_use]
pub fn normalize(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Normalize typed input and cap it at 11 digits, as an input field does
#[must_use]
pub fn sanitize_input(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CPF_LEN)
        .collect()
}

/// Returns true only when both check digits of the normalized input match
#[must_use]
pub fn validate(identifier: &str) -> bool {
    check(&normalize(identifier)).is_ok()
}

fn check(digits: &str) -> Result<(), ValidationError> {
    if digits.len() != CPF_LEN {
        return Err(ValidationError::WrongLength {
            found: digits.len(),
        });
    }

    let d: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    if d.iter().all(|&x| x == d[0]) {
        return Err(ValidationError::RepeatedDigits);
    }

    for position in [9, 10] {
        let expected = check_digit(&d[..position]);
        if expected != d[position] {
            return Err(ValidationError::ChecksumMismatch {
                position,
                expected,
                found: d[position],
            });
        }
    }
    Ok(())
}

/// Weighted mod-11 check digit over `prefix`
///
/// Weights run from `prefix.len() + 1` down to 2; a remainder of 10 maps to 0.
#[must_use]
pub fn check_digit(prefix: &[u8]) -> u8 {
    let top = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .zip((2..=top).rev())
        .map(|(&digit, weight)| u32::from(digit) * weight)
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        rest => rest as u8,
    }
}

/// Incremental feedback while an identifier is being typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierFeedback {
    /// Nothing typed yet
    Empty,
    /// 1 to 10 digits typed
    Incomplete,
    /// 11 digits that fail validation
    Invalid,
    /// 11 digits that pass validation
    Valid,
}

impl IdentifierFeedback {
    /// Whether an inline error should be shown
    #[inline]
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, Self::Incomplete | Self::Invalid)
    }

    /// Inline message shown under the input field
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Incomplete => Some("CPF incompleto"),
            Self::Invalid => Some("CPF inválido"),
            Self::Empty | Self::Valid => None,
        }
    }
}

/// Feedback for the current contents of an identifier input
#[must_use]
pub fn feedback(input: &str) -> IdentifierFeedback {
    let digits = sanitize_input(input);
    match digits.len() {
        0 => IdentifierFeedback::Empty,
        n if n < CPF_LEN => IdentifierFeedback::Incomplete,
        _ if check(&digits).is_ok() => IdentifierFeedback::Valid,
        _ => IdentifierFeedback::Invalid,
    }
}
