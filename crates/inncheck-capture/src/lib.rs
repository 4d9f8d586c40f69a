//! InnCheck Capture - guest intake sequencing
//!
//! Drives the four-step intake that admits a guest to a unit:
//! - Identity entry with incremental CPF feedback
//! - Document photo from the rear camera
//! - Mirrored face photo from the front camera, taken by countdown or on demand
//! - Confirmation producing an immutable [`GuestRecord`](inncheck_core::GuestRecord)
//!
//! Camera streams are scoped: the sequencer holds at most one and releases
//! it on every exit path.
//!
//! # Example
//!
//! ```rust,ignore
//! use inncheck_capture::prelude::*;
//!
//! # async fn example() -> Result<(), IntakeError> {
//! let camera = StillImageCamera::new("doc.jpg", "face.jpg");
//! let mut seq = CaptureSequencer::new(camera, JpegStillEncoder::default(), CaptureConfig::new());
//!
//! seq.set_name("Maria Souza")?;
//! seq.set_identifier("529.982.247-25")?;
//! seq.advance().await?;
//! seq.capture().await?;
//!
//! let (_tx, mut commands) = tokio::sync::mpsc::channel(1);
//! seq.run_face_countdown(&mut commands).await?;
//! let guest = seq.complete(&chrono::Local::now())?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod camera;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod sequencer;
pub mod still;
pub mod timer;

pub use camera::{Camera, CameraStream, Facing, Resolution, StreamGuard};
pub use encoder::{JpegStillEncoder, StillEncoder};
pub use error::{
    CameraAcquisitionError, CameraError, CancelReason, FrameError, ImageEncodingError,
    IntakeError,
};
pub use frame::{normalize, Frame};
pub use sequencer::{CaptureCommand, CaptureConfig, CaptureSequencer, CaptureSession, CaptureStep};
pub use still::StillImageCamera;
pub use timer::{start_countdown, TimerEvent, TimerHandle};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving an intake
    pub use crate::{
        CaptureCommand, CaptureConfig, CaptureSequencer, CaptureStep, IntakeError,
        JpegStillEncoder, StillImageCamera,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
