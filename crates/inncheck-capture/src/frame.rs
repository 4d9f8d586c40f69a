//! RGB frames and capture normalization
//!
//! Every capture is cropped to a centered square using the shorter side of
//! the frame, then resampled to a fixed output size. Face captures are
//! mirrored so the stored photo reads the right way round.

use crate::error::FrameError;

const CHANNELS: usize = 3;

/// Tightly packed RGB8 frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Wrap a pixel buffer
    ///
    /// # Errors
    /// `FrameError` for zero dimensions or a buffer of the wrong length.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::Empty { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Single-color frame (zero dimensions are raised to 1)
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let pixels = rgb.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB8 bytes, row-major
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume into the raw buffer
    #[must_use]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Color at `(x, y)`, `None` outside the frame
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = self.offset(x, y);
        Some([self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]])
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

/// Centered square region `(x, y, side)` of a `width` x `height` frame
#[inline]
#[must_use]
pub fn square_crop(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}

/// Crop to the centered square and resample to `output` x `output`
///
/// Nearest-neighbour sampling. With `mirror` the result is flipped
/// horizontally.
#[must_use]
pub fn normalize(frame: &Frame, output: u32, mirror: bool) -> Frame {
    let output = output.max(1);
    let (x0, y0, side) = square_crop(frame.width, frame.height);
    let scale = |d: u32| (u64::from(d) * u64::from(side) / u64::from(output)) as u32;

    let mut pixels = Vec::with_capacity(output as usize * output as usize * CHANNELS);
    for y in 0..output {
        let sy = y0 + scale(y);
        for x in 0..output {
            let dx = if mirror { output - 1 - x } else { x };
            let at = frame.offset(x0 + scale(dx), sy);
            pixels.extend_from_slice(&frame.pixels[at..at + CHANNELS]);
        }
    }

    Frame {
        width: output,
        height: output,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RED: [u8; 3] = [255, 0, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    /// Left half red, right half blue
    fn split(width: u32, height: u32) -> Frame {
        let mut pixels = Vec::new();
        for _ in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(if x < width / 2 { &RED } else { &BLUE });
            }
        }
        Frame::new(width, height, pixels).unwrap()
    }

    #[test]
    fn rejects_bad_buffers() {
        assert_eq!(
            Frame::new(0, 4, vec![]),
            Err(FrameError::Empty {
                width: 0,
                height: 4
            })
        );
        assert_eq!(
            Frame::new(2, 2, vec![0; 11]),
            Err(FrameError::SizeMismatch {
                expected: 12,
                found: 11
            })
        );
    }

    #[test]
    fn crop_is_centered() {
        assert_eq!(square_crop(640, 480), (80, 0, 480));
        assert_eq!(square_crop(480, 640), (0, 80, 480));
        assert_eq!(square_crop(401, 400), (0, 0, 400));
        assert_eq!(square_crop(300, 300), (0, 0, 300));
    }

    #[test]
    fn landscape_frame_keeps_center() {
        // 8x4: the centered 4x4 square spans columns 2..6
        let out = normalize(&split(8, 4), 4, false);
        assert_eq!(out.width(), 4);
        assert_eq!(out.pixel(0, 0), Some(RED));
        assert_eq!(out.pixel(1, 3), Some(RED));
        assert_eq!(out.pixel(2, 0), Some(BLUE));
        assert_eq!(out.pixel(3, 3), Some(BLUE));
    }

    #[test]
    fn mirror_flips_columns() {
        let out = normalize(&split(8, 4), 4, true);
        assert_eq!(out.pixel(0, 0), Some(BLUE));
        assert_eq!(out.pixel(3, 0), Some(RED));
    }

    #[test]
    fn upscales_small_frames() {
        let out = normalize(&split(2, 2), 400, false);
        assert_eq!((out.width(), out.height()), (400, 400));
        assert_eq!(out.pixel(0, 0), Some(RED));
        assert_eq!(out.pixel(399, 399), Some(BLUE));
    }

    proptest! {
        #[test]
        fn prop_output_is_square(w in 1u32..64, h in 1u32..64, out in 1u32..48, mirror: bool) {
            let frame = Frame::filled(w, h, [1, 2, 3]);
            let n = normalize(&frame, out, mirror);
            prop_assert_eq!((n.width(), n.height()), (out, out));
            prop_assert_eq!(n.pixels().len(), (out * out * 3) as usize);
        }

        #[test]
        fn prop_mirror_is_involutive(w in 1u32..32, h in 1u32..32) {
            let frame = split(w.max(2), h);
            let side = frame.width().min(frame.height());
            let once = normalize(&frame, side, true);
            let twice = normalize(&once, side, true);
            prop_assert_eq!(twice, normalize(&frame, side, false));
        }
    }
}
