//! Camera abstraction
//!
//! A [`Camera`] hands out at most one [`CameraStream`] per acquisition. The
//! sequencer wraps every stream in a [`StreamGuard`] so the device is
//! released on every exit path, including early returns and panics.

use crate::error::{CameraAcquisitionError, CameraError};
use crate::frame::Frame;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way the camera points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Rear camera, used for the identity document
    Environment,
    /// Front camera, used for the face photo
    User,
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Environment => "environment",
            Self::User => "user",
        })
    }
}

/// Requested capture resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Square resolution
    #[inline]
    #[must_use]
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// Live video stream from an acquired camera
pub trait CameraStream: Send {
    /// Facing the stream was opened with
    fn facing(&self) -> Facing;

    /// Grab the current frame
    ///
    /// # Errors
    /// `CameraError::Released` after [`release`](Self::release).
    fn frame(&mut self) -> Result<Frame, CameraError>;

    /// Stop the stream and free the device; calling it twice is a no-op
    fn release(&mut self);

    /// Whether the stream has been released
    fn is_released(&self) -> bool;
}

/// Source of camera streams
#[async_trait::async_trait]
pub trait Camera: Send + Sync {
    /// Stream type produced by this camera
    type Stream: CameraStream;

    /// Open a stream, suspending until the device or permission resolves
    async fn acquire(
        &self,
        facing: Facing,
        ideal: Resolution,
    ) -> Result<Self::Stream, CameraAcquisitionError>;
}

/// Owns a stream and releases it on drop
#[derive(Debug)]
pub struct StreamGuard<S: CameraStream> {
    stream: Option<S>,
}

impl<S: CameraStream> StreamGuard<S> {
    /// Take ownership of an open stream
    #[must_use]
    pub fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// Facing of the guarded stream
    #[must_use]
    pub fn facing(&self) -> Option<Facing> {
        self.stream.as_ref().map(CameraStream::facing)
    }

    /// Grab the current frame
    ///
    /// # Errors
    /// `CameraError::Released` once the guard has released the stream.
    pub fn frame(&mut self) -> Result<Frame, CameraError> {
        self.stream
            .as_mut()
            .ok_or(CameraError::Released)?
            .frame()
    }

    /// Release the stream now
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if !stream.is_released() {
                tracing::debug!(facing = %stream.facing(), "Releasing camera stream");
                stream.release();
            }
        }
    }
}

impl<S: CameraStream> Drop for StreamGuard<S> {
    fn drop(&mut self) {
        self.release_inner();
    }
}
