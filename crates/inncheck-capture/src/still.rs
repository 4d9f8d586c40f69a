//! File-backed camera
//!
//! Serves a fixed picture per facing, for unattended intake from photos
//! taken elsewhere.

use crate::camera::{Camera, CameraStream, Facing, Resolution};
use crate::error::{CameraAcquisitionError, CameraError};
use crate::frame::Frame;
use std::io;
use std::path::{Path, PathBuf};

/// Camera that reads one image file per facing
#[derive(Debug, Clone)]
pub struct StillImageCamera {
    document: PathBuf,
    face: PathBuf,
}

impl StillImageCamera {
    /// `document` feeds the environment camera, `face` the user camera
    #[must_use]
    pub fn new(document: impl Into<PathBuf>, face: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            face: face.into(),
        }
    }

    fn path(&self, facing: Facing) -> &Path {
        match facing {
            Facing::Environment => &self.document,
            Facing::User => &self.face,
        }
    }
}

/// Stream over a decoded still
#[derive(Debug)]
pub struct StillStream {
    facing: Facing,
    frame: Frame,
    released: bool,
}

impl CameraStream for StillStream {
    fn facing(&self) -> Facing {
        self.facing
    }

    fn frame(&mut self) -> Result<Frame, CameraError> {
        if self.released {
            return Err(CameraError::Released);
        }
        Ok(self.frame.clone())
    }

    fn release(&mut self) {
        self.released = true;
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

#[async_trait::async_trait]
impl Camera for StillImageCamera {
    type Stream = StillStream;

    async fn acquire(
        &self,
        facing: Facing,
        ideal: Resolution,
    ) -> Result<StillStream, CameraAcquisitionError> {
        let path = self.path(facing);
        tracing::debug!(%facing, path = %path.display(), ?ideal, "Opening still camera");

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CameraAcquisitionError::NoDevice(facing),
            io::ErrorKind::PermissionDenied => CameraAcquisitionError::PermissionDenied,
            _ => CameraAcquisitionError::Other(format!("{}: {e}", path.display())),
        })?;
        let rgb = image::load_from_memory(&bytes)
            .map_err(|e| CameraAcquisitionError::Other(format!("{}: {e}", path.display())))?
            .to_rgb8();
        let (width, height) = rgb.dimensions();
        let frame = Frame::new(width, height, rgb.into_raw())
            .map_err(|e| CameraAcquisitionError::Other(e.to_string()))?;

        Ok(StillStream {
            facing,
            frame,
            released: false,
        })
    }
}
