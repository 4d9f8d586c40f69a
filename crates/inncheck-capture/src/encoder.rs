//! Still image encoding

use crate::error::ImageEncodingError;
use crate::frame::Frame;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use inncheck_core::CapturedImage;

/// Turns a normalized frame into a stored image
pub trait StillEncoder: Send + Sync {
    /// Encode one frame
    ///
    /// # Errors
    /// `ImageEncodingError` when the encoder rejects the frame.
    fn encode(&self, frame: &Frame) -> Result<CapturedImage, ImageEncodingError>;
}

/// JPEG encoder backed by the `image` crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegStillEncoder {
    quality: u8,
}

impl JpegStillEncoder {
    /// Default quality (0.8 on a 0..1 scale)
    pub const DEFAULT_QUALITY: u8 = 80;

    /// Encoder with `quality` in 1..=100
    #[must_use]
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    #[inline]
    #[must_use]
    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegStillEncoder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUALITY)
    }
}

impl StillEncoder for JpegStillEncoder {
    fn encode(&self, frame: &Frame) -> Result<CapturedImage, ImageEncodingError> {
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, self.quality)
            .encode(
                frame.pixels(),
                frame.width(),
                frame.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| ImageEncodingError::Encoder(e.to_string()))?;
        tracing::debug!(
            width = frame.width(),
            height = frame.height(),
            bytes = buf.len(),
            "Encoded still"
        );
        Ok(CapturedImage::jpeg(buf))
    }
}
