//! Testing utilities for InnCheck workspace
//!
//! Shared fakes and fixtures:
//! - a scripted camera that records every acquisition and release
//! - encoders that keep raw pixels or fail on demand
//! - frames, identifiers, guests and templates

#![allow(missing_docs)]

use async_trait::async_trait;
use image::{Rgb, RgbImage};
use inncheck_capture::{
    Camera, CameraAcquisitionError, CameraError, CameraStream, CaptureConfig, Facing, Frame,
    ImageEncodingError, Resolution, StillEncoder,
};
use inncheck_core::{
    assemble, CapturedImage, Category, ChecklistTemplate, Cpf, GuestRecord,
};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const RED: [u8; 3] = [255, 0, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];

/// Checksum-valid CPF
pub const VALID_CPF: &str = "52998224725";
/// Same CPF with the last digit altered
pub const INVALID_CPF: &str = "52998224726";

/// MIME type of [`RawStillEncoder`] output
pub const RAW_MIME: &str = "image/x-raw-rgb";

/// Frame with the left half red and the right half blue
pub fn split_frame(width: u32, height: u32) -> Frame {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(if x < width / 2 { &RED } else { &BLUE });
        }
    }
    Frame::new(width, height, pixels).unwrap()
}

/// Pixel of a square raw RGB buffer of side `size`
pub fn raw_pixel(bytes: &[u8], size: u32, x: u32, y: u32) -> [u8; 3] {
    let at = ((y * size + x) * 3) as usize;
    [bytes[at], bytes[at + 1], bytes[at + 2]]
}

/// Write a left-red/right-blue PNG
pub fn write_split_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb(RED)
        } else {
            Rgb(BLUE)
        }
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Small, quick sequencer settings: 4x4 output, 3 second countdown
pub fn fast_config() -> CaptureConfig {
    CaptureConfig::new()
        .with_output_size(4)
        .with_countdown_secs(3)
}

pub fn sample_guest() -> GuestRecord {
    assemble(
        "Maria Souza",
        Cpf::parse(VALID_CPF).unwrap(),
        CapturedImage::jpeg(vec![0xff, 0xd8, 0xff, 0xd9]),
        CapturedImage::jpeg(vec![0xff, 0xd8, 0xff, 0xd9]),
        &chrono::Utc::now(),
    )
    .unwrap()
}

pub fn sample_template() -> ChecklistTemplate {
    let mut tpl = ChecklistTemplate::new("Checklist Integral").unwrap();
    tpl.add_item("TV 50” LG + controle", Category::CasaSede).unwrap();
    tpl.add_item("Repetidor de sinal Wi-Fi", Category::CasaSede).unwrap();
    tpl.add_item("1 Airfryer", Category::AreaGourmet).unwrap();
    tpl.add_item("Boia da piscina", Category::Piscina).unwrap();
    tpl
}

#[derive(Debug, Default)]
struct ProbeState {
    acquired: Vec<Facing>,
    released: usize,
}

/// Shared view of what a [`FakeCamera`] has done
#[derive(Debug, Clone, Default)]
pub struct CameraProbe(Arc<Mutex<ProbeState>>);

impl CameraProbe {
    /// Facings acquired, in order
    pub fn acquired(&self) -> Vec<Facing> {
        self.0.lock().acquired.clone()
    }

    /// Number of streams released
    pub fn released(&self) -> usize {
        self.0.lock().released
    }

    /// Streams acquired and not yet released
    pub fn open_streams(&self) -> usize {
        let state = self.0.lock();
        state.acquired.len() - state.released
    }
}

/// Camera serving one fixed frame per facing
#[derive(Debug, Clone)]
pub struct FakeCamera {
    document: Frame,
    face: Frame,
    failure: Option<(Facing, CameraAcquisitionError)>,
    probe: CameraProbe,
}

impl FakeCamera {
    pub fn new(document: Frame, face: Frame) -> Self {
        Self {
            document,
            face,
            failure: None,
            probe: CameraProbe::default(),
        }
    }

    /// Both facings serve [`split_frame`]
    pub fn split(width: u32, height: u32) -> Self {
        Self::new(split_frame(width, height), split_frame(width, height))
    }

    /// Fail every acquisition of `facing`
    pub fn with_failure(mut self, facing: Facing, error: CameraAcquisitionError) -> Self {
        self.failure = Some((facing, error));
        self
    }

    pub fn probe(&self) -> CameraProbe {
        self.probe.clone()
    }
}

/// Stream handed out by [`FakeCamera`]
#[derive(Debug)]
pub struct FakeStream {
    facing: Facing,
    frame: Frame,
    released: bool,
    probe: CameraProbe,
}

impl CameraStream for FakeStream {
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
        if !self.released {
            self.released = true;
            self.probe.0.lock().released += 1;
        }
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

#[async_trait]
impl Camera for FakeCamera {
    type Stream = FakeStream;

    async fn acquire(
        &self,
        facing: Facing,
        _ideal: Resolution,
    ) -> Result<FakeStream, CameraAcquisitionError> {
        if let Some((failing, error)) = &self.failure {
            if *failing == facing {
                return Err(error.clone());
            }
        }
        self.probe.0.lock().acquired.push(facing);
        let frame = match facing {
            Facing::Environment => self.document.clone(),
            Facing::User => self.face.clone(),
        };
        Ok(FakeStream {
            facing,
            frame,
            released: false,
            probe: self.probe.clone(),
        })
    }
}

/// Stores the normalized pixels untouched so tests can inspect them
#[derive(Debug, Clone, Copy, Default)]
pub struct RawStillEncoder;

impl StillEncoder for RawStillEncoder {
    fn encode(&self, frame: &Frame) -> Result<CapturedImage, ImageEncodingError> {
        Ok(CapturedImage::new(RAW_MIME, frame.pixels().to_vec()))
    }
}

/// Succeeds `skip` times, then fails `failures` times, then behaves like
/// [`RawStillEncoder`]
#[derive(Debug, Default)]
pub struct FailingEncoder {
    calls: AtomicUsize,
    skip: usize,
    failures: usize,
}

impl FailingEncoder {
    pub fn new(skip: usize, failures: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            skip,
            failures,
        }
    }

    /// Fail the first `n` encodes
    pub fn times(n: usize) -> Self {
        Self::new(0, n)
    }

    pub fn always() -> Self {
        Self::times(usize::MAX)
    }
}

impl StillEncoder for FailingEncoder {
    fn encode(&self, frame: &Frame) -> Result<CapturedImage, ImageEncodingError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.skip && call - self.skip < self.failures {
            return Err(ImageEncodingError::Encoder("canvas unavailable".into()));
        }
        RawStillEncoder.encode(frame)
    }
}
