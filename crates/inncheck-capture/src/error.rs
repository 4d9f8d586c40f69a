//! Error types for the capture sequencer
//!
//! Provides error handling for:
//! - Camera acquisition (permission denied, missing device)
//! - Reading frames from a live stream
//! - Still image encoding
//! - Intake sessions driven out of order or after cancellation

use crate::camera::Facing;
use crate::sequencer::CaptureStep;
use inncheck_core::ValidationError;

/// Camera could not be opened
///
/// Ends the intake session: the sequencer releases everything it holds and
/// reports a cancellation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraAcquisitionError {
    /// User or platform refused camera access
    #[error("camera permission denied")]
    PermissionDenied,

    /// No camera with the requested facing
    #[error("no {0} camera available")]
    NoDevice(Facing),

    /// Any other device failure
    #[error("camera unavailable: {0}")]
    Other(String),
}

/// Pixel buffer does not describe a valid frame
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Zero width or height
    #[error("empty frame ({width}x{height})")]
    Empty { width: u32, height: u32 },

    /// Buffer length does not match the dimensions
    #[error("frame buffer has {found} bytes, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },
}

/// Reading from an open stream failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    /// Stream was already released
    #[error("camera stream already released")]
    Released,

    /// Device reported an error
    #[error("camera device error: {0}")]
    Device(String),

    /// Device produced a malformed frame
    #[error("bad frame: {0}")]
    Frame(#[from] FrameError),
}

/// Still image could not be encoded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageEncodingError {
    /// Encoder rejected the frame
    #[error("encoder failed: {0}")]
    Encoder(String),
}

/// Why an intake session ended without a record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CancelReason {
    /// Caller cancelled
    #[error("cancelled by operator")]
    Requested,

    /// Camera could not be acquired
    #[error("{0}")]
    CameraUnavailable(CameraAcquisitionError),
}

/// Intake session error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    /// Guest identity is incomplete or invalid
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Session ended without a record
    #[error("intake cancelled: {0}")]
    Cancelled(CancelReason),

    /// Still encoding failed; the step is kept and capture may be retried
    #[error("image encoding failed: {0}")]
    Encoding(#[from] ImageEncodingError),

    /// Frame could not be read; the step is kept and capture may be retried
    #[error("camera error: {0}")]
    Camera(#[from] CameraError),

    /// Session was already cancelled
    #[error("intake session is closed")]
    SessionClosed,

    /// Operation not valid in the current step
    #[error("operation requires step {expected:?}, session is at {actual:?}")]
    WrongStep {
        expected: CaptureStep,
        actual: CaptureStep,
    },

    /// No camera stream is open
    #[error("camera not ready")]
    CameraNotReady,
}

impl IntakeError {
    /// Check if the same operation may succeed when retried
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Encoding(_) | Self::Camera(_))
    }

    /// Check if the session ended without a record
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_) | Self::SessionClosed)
    }
}
