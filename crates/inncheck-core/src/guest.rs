//! Guest records
//!
//! A [`GuestRecord`] only exists once an intake has produced a validated
//! identifier and both captured images; [`assemble`] is the single way to
//! build one. Check-out later derives a new record carrying the check-out
//! stamp, the original is never mutated.

use crate::cpf::Cpf;
use crate::error::{CoreError, ValidationError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clock format used for check-in and check-out times
pub const TIME_FORMAT: &str = "%H:%M";

/// An encoded still image
///
/// Persisted as a `data:<mime>;base64,<payload>` URI.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CapturedImage {
    mime: String,
    bytes: Vec<u8>,
}

impl CapturedImage {
    /// Wrap an encoded payload
    #[must_use]
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Wrap a JPEG payload
    #[inline]
    #[must_use]
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new("image/jpeg", bytes)
    }

    /// MIME type of the payload
    #[inline]
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Encoded bytes
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:` URI form
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }

    /// Parse a `data:<mime>;base64,<payload>` URI
    ///
    /// # Errors
    /// `CoreError::InvalidImage` when the URI is not base64 data.
    pub fn from_data_uri(uri: &str) -> Result<Self, CoreError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| CoreError::InvalidImage("missing data: prefix".into()))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| CoreError::InvalidImage("not a base64 data URI".into()))?;
        let bytes = BASE64
            .decode(payload)
            .map_err(|e| CoreError::InvalidImage(e.to_string()))?;
        Ok(Self::new(mime, bytes))
    }
}

impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl TryFrom<String> for CapturedImage {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_data_uri(&value)
    }
}

impl From<CapturedImage> for String {
    fn from(value: CapturedImage) -> Self {
        value.to_data_uri()
    }
}

/// The occupant attached to a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    name: String,
    #[serde(rename = "documentId")]
    identifier: Cpf,
    #[serde(rename = "documentPhotoUri")]
    document_image: CapturedImage,
    #[serde(rename = "facePhotoUri")]
    face_image: CapturedImage,
    check_in_date: i64,
    check_in_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    check_out_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    check_out_time: Option<String>,
}

impl GuestRecord {
    /// Full name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated CPF
    #[must_use]
    pub fn identifier(&self) -> &Cpf {
        &self.identifier
    }

    /// Photo of the identity document
    #[must_use]
    pub fn document_image(&self) -> &CapturedImage {
        &self.document_image
    }

    /// Face photo
    #[must_use]
    pub fn face_image(&self) -> &CapturedImage {
        &self.face_image
    }

    /// Check-in instant, milliseconds since epoch
    #[must_use]
    pub fn check_in_date(&self) -> i64 {
        self.check_in_date
    }

    /// Check-in clock time (`HH:MM`)
    #[must_use]
    pub fn check_in_time(&self) -> &str {
        &self.check_in_time
    }

    /// Check-out instant, if checked out
    #[must_use]
    pub fn check_out_date(&self) -> Option<i64> {
        self.check_out_date
    }

    /// Check-out clock time, if checked out
    #[must_use]
    pub fn check_out_time(&self) -> Option<&str> {
        self.check_out_time.as_deref()
    }

    /// Copy of this record stamped with the check-out instant
    #[must_use]
    pub fn checked_out<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self {
            check_out_date: Some(now.timestamp_millis()),
            check_out_time: Some(now.format(TIME_FORMAT).to_string()),
            ..self.clone()
        }
    }
}

/// Build a guest record from a completed intake
///
/// # Errors
/// `ValidationError::EmptyName` when the name is blank.
pub fn assemble<Tz: TimeZone>(
    name: &str,
    identifier: Cpf,
    document_image: CapturedImage,
    face_image: CapturedImage,
    now: &DateTime<Tz>,
) -> Result<GuestRecord, ValidationError>
where
    Tz::Offset: fmt::Display,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    tracing::debug!(guest = name, "Assembling guest record");

    Ok(GuestRecord {
        name: name.to_string(),
        identifier,
        document_image,
        face_image,
        check_in_date: now.timestamp_millis(),
        check_in_time: now.format(TIME_FORMAT).to_string(),
        check_out_date: None,
        check_out_time: None,
    })
}
